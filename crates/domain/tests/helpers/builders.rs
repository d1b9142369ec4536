#![allow(dead_code)]

/// Builds dotted names out of labels of chosen lengths.
pub struct DomainNameBuilder {
    labels: Vec<String>,
}

impl DomainNameBuilder {
    pub fn new() -> Self {
        Self { labels: Vec::new() }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.labels.push(label.to_string());
        self
    }

    /// Appends a label of `len` bytes cycling through `a..z`.
    pub fn label_of_len(mut self, len: usize) -> Self {
        let label: String = (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect();
        self.labels.push(label);
        self
    }

    pub fn build(self) -> String {
        self.labels.join(".")
    }
}

pub struct ConfigTomlBuilder {
    sections: Vec<String>,
}

impl ConfigTomlBuilder {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    pub fn upstream(mut self, server: &str) -> Self {
        self.sections
            .push(format!("[upstream]\nserver = \"{}\"\n", server));
        self
    }

    pub fn client(mut self, max_attempts: u16, timeout_ms: u64) -> Self {
        self.sections.push(format!(
            "[client]\nmax_attempts = {}\ntimeout_ms = {}\n",
            max_attempts, timeout_ms
        ));
        self
    }

    pub fn logging(mut self, level: &str) -> Self {
        self.sections
            .push(format!("[logging]\nlevel = \"{}\"\n", level));
        self
    }

    pub fn build(self) -> String {
        self.sections.join("\n")
    }
}
