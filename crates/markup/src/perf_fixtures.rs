use crate::{Props, Template, Value};

pub const BLOCK_SEGMENTS: [&str; 4] = [
    "<div class=\"box\"><span title=\"",
    "\">hello ",
    "</span><img ",
    " /></div>",
];

/// Repeats one block of markup `blocks` times, with three holes per block.
pub fn make_blocks<N>(blocks: usize) -> Template<N> {
    let mut builder = Template::builder();
    for i in 0..blocks {
        builder = builder
            .text(BLOCK_SEGMENTS[0])
            .hole(Value::Text(format!("t{i}")))
            .text(BLOCK_SEGMENTS[1])
            .hole(Value::Number(i as f64))
            .text(BLOCK_SEGMENTS[2])
            .hole(Value::Props(Props::new().with("src", "x")))
            .text(BLOCK_SEGMENTS[3]);
    }
    builder.build()
}

/// `depth` nested `<div>` elements around a single text hole.
pub fn make_nested<N>(depth: usize) -> Template<N> {
    let mut builder = Template::builder();
    for _ in 0..depth {
        builder = builder.text("<div>");
    }
    builder = builder.hole("leaf");
    for _ in 0..depth {
        builder = builder.text("</div>");
    }
    builder.build()
}
