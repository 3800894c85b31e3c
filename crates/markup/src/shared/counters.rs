//! Optional counters for instrumentation.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    pub steps: u64,
    pub state_transitions: u64,
    pub nodes_created: u64,
    pub components_invoked: u64,
    pub holes_spliced: u64,
    pub deepest_frame: usize,
    pub parse_errors: u64,
}
