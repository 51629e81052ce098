use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no such character group: {0}")]
    UnknownGroup(String),

    #[error("no such digest algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("entropy accumulator was already started")]
    AlreadyStarted,

    #[error("entropy accumulator is already finished")]
    AlreadyFinished,

    #[error("digest result is not ready")]
    ResultNotReady,

    #[error("failed to spawn entropy worker")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("entropy worker terminated abnormally")]
    WorkerFailed,
}
