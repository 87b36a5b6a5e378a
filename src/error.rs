#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The allocator could not hand out storage for a node or a payload. The
    /// tree is left untouched.
    #[error("cannot allocate {size} bytes for {what}")]
    AllocationFailure { what: &'static str, size: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
