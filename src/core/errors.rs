/// Errors raised while validating kitchen or shift configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A duration that must be strictly positive was zero or negative
    NonPositiveDuration(String),
    /// A value that must not be negative was negative
    NegativeValue(String),
    /// A lower bound exceeded its upper bound
    InvalidRange(String),
    /// A count or capacity was out of its allowed bounds
    InvalidCount(String),
    /// A probability weight table could not be used
    InvalidWeights(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveDuration(msg) => write!(f, "Non-positive duration: {}", msg),
            ConfigError::NegativeValue(msg) => write!(f, "Negative value: {}", msg),
            ConfigError::InvalidRange(msg) => write!(f, "Invalid range: {}", msg),
            ConfigError::InvalidCount(msg) => write!(f, "Invalid count: {}", msg),
            ConfigError::InvalidWeights(msg) => write!(f, "Invalid weights: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = ConfigError::InvalidRange("burger quantity 3..1".to_string());
        assert_eq!(err.to_string(), "Invalid range: burger quantity 3..1");
    }
}
