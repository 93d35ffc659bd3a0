use thiserror::Error;

/// Anything that can stop the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Cpu(#[from] motorola_6809::Error),
    #[error(transparent)]
    Config(#[from] tandy_gime::ConfigError),
}
