//! Gauge families and their Prometheus text exposition.

pub const LIVENESS: &str = "system_health_liveness";
pub const READINESS: &str = "system_health_readiness";
pub const CHECK_STATUS: &str = "system_health_check_status";
pub const LAST_CHECK_SECONDS: &str = "system_health_last_check_seconds";

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub labels: Vec<(&'static str, String)>,
    pub value: i64,
    pub timestamp: Option<i64>,
}

impl Sample {
    pub fn new(value: i64) -> Self {
        Self {
            labels: Vec::new(),
            value,
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach a label. Only `"` is escaped in the value.
    pub fn with_label(mut self, name: &'static str, value: &str) -> Self {
        self.labels.push((name, escape_label_value(value)));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeFamily {
    pub name: &'static str,
    pub help: &'static str,
    pub samples: Vec<Sample>,
}

impl GaugeFamily {
    pub fn new(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            samples: Vec::new(),
        }
    }

    pub fn with_sample(mut self, sample: Sample) -> Self {
        self.samples.push(sample);
        self
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    fn render_into(&self, lines: &mut Vec<String>) {
        lines.push(format!("# HELP {} {}", self.name, self.help));
        lines.push(format!("# TYPE {} gauge", self.name));

        for sample in &self.samples {
            let mut line = self.name.to_string();
            if !sample.labels.is_empty() {
                let labels: Vec<String> = sample
                    .labels
                    .iter()
                    .map(|(name, value)| format!("{name}=\"{value}\""))
                    .collect();
                line.push('{');
                line.push_str(&labels.join(","));
                line.push('}');
            }
            line.push_str(&format!(" {}", sample.value));
            if let Some(ts) = sample.timestamp {
                line.push_str(&format!(" {ts}"));
            }
            lines.push(line);
        }
    }
}

/// One run's worth of metrics, rendered in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsDocument {
    families: Vec<GaugeFamily>,
}

impl MetricsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, family: GaugeFamily) {
        self.families.push(family);
    }

    #[cfg(test)]
    pub(crate) fn family(&self, name: &str) -> Option<&GaugeFamily> {
        self.families.iter().find(|f| f.name == name)
    }

    /// Exposition text, newline-joined with exactly one trailing newline.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for family in &self.families {
            family.render_into(&mut lines);
        }
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

// Backslashes and newlines pass through untouched.
pub fn escape_label_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
