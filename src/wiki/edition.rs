use serde::Serialize;

/// Language edition of the encyclopedia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    Simple,
    En,
}

impl Edition {
    pub fn as_str(self) -> &'static str {
        match self {
            Edition::Simple => "simple",
            Edition::En => "en",
        }
    }
}

impl std::fmt::Display for Edition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
