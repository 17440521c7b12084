use crate::wire::HealthRes;

/// Simple health service for the REST API.
///
/// This service provides a standardised way to report the health status of the
/// heart failure detection service. It can be used both as a static utility
/// and as an instantiated service.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Static method to check health without creating an instance.
    ///
    /// This is the preferred method for health checks as it doesn't require
    /// instantiating the service.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            status: "healthy".into(),
            service: "Heart Failure Detection API".into(),
            version: "1.0.0".into(),
        }
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_health_reports_healthy() {
        let res = HealthService::check_health();
        assert_eq!(res.status, "healthy");
        assert_eq!(res.service, "Heart Failure Detection API");
        assert_eq!(res.version, "1.0.0");
    }
}
