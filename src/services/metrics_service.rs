use prometheus::{Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

/// Counter and timer for the properties endpoint
#[derive(Clone)]
pub struct PropertiesMetrics {
    registry: Registry,
    requests: IntCounter,
    duration: Histogram,
}

impl PropertiesMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests = IntCounter::new(
            "get_properties_total",
            "Number of times the properties of a system is requested",
        )?;
        let duration = Histogram::with_opts(HistogramOpts::new(
            "get_properties_time_seconds",
            "Time needed to get the properties of a system",
        ))?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self {
            registry,
            requests,
            duration,
        })
    }

    /// Counts one request and times it until the returned timer is dropped
    pub fn start_request(&self) -> prometheus::HistogramTimer {
        self.requests.inc();
        self.duration.start_timer()
    }

    /// Renders every collector in the text exposition format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }
}
