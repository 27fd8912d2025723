use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Election cannot be called: {0}")]
    ElectionNotAllowed(String),

    #[error("Parliament has reached its term limit; an election must be held")]
    ElectionOverdue,

    #[error("No election has been called")]
    NoElectionCalled,

    #[error("Bill not found: {0}")]
    BillNotFound(String),

    #[error("Insufficient resources: {0}")]
    InsufficientResources(String),

    #[error("Save slot {0} does not exist (valid slots are 1-3)")]
    UnknownSlot(u8),

    #[error("Save slot {0} is empty")]
    EmptySlot(u8),

    #[error("Incompatible save version {found} (expected {expected})")]
    SaveVersion { found: String, expected: String },

    #[error("Generator error: {0}")]
    Generator(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
