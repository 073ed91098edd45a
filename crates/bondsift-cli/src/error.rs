use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] bondsift_core::ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Screen(#[from] bondsift_core::ScreenError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::Screen(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondsift_core::ScreenError;

    #[test]
    fn exit_codes_follow_the_documented_map() {
        assert_eq!(CliError::from(ScreenError::SourceUnavailable).exit_code(), 3);
        assert_eq!(CliError::Command(String::from("bad flag")).exit_code(), 2);
    }

    #[test]
    fn screen_errors_render_transparently() {
        let error = CliError::from(ScreenError::stale_snapshot("tty"));
        assert_eq!(error.to_string(), "no stored shortlist for session 'tty'");
    }
}
