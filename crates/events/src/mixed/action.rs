/// Actions an observer can take during a mixed-system search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the search and leave the iteration variables as they are.
    StopEarly,
}
