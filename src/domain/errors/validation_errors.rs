/// A single violated field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldViolation {
    TitleRequired,
    DescriptionRequired,
    TitleTooLong { actual: usize, max: usize },
    DescriptionTooLong { actual: usize, max: usize },
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldViolation::TitleRequired => write!(f, "Title is required"),
            FieldViolation::DescriptionRequired => write!(f, "Description is required"),
            FieldViolation::TitleTooLong { actual, max } => {
                write!(f, "Title must be at most {} characters (got {})", max, actual)
            }
            FieldViolation::DescriptionTooLong { actual, max } => {
                write!(
                    f,
                    "Description must be at most {} characters (got {})",
                    max, actual
                )
            }
        }
    }
}

/// Validation failure listing every violated rule, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// The joined rule list surfaced to callers.
    pub fn joined(&self) -> String {
        self.violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.joined())
    }
}

impl std::error::Error for ValidationError {}
