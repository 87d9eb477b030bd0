//! Limit/offset parameters for list endpoints.

use serde::Deserialize;

/// Default page size for the audit trail.
pub const DEFAULT_TRAIL_LIMIT: usize = 50;

/// Default page size for filtered audit queries.
pub const DEFAULT_FILTER_LIMIT: usize = 20;

/// Default result count for knowledge and ranking queries.
pub const DEFAULT_QUERY_LIMIT: usize = 10;

/// Upper bound on any requested page size.
pub const MAX_LIMIT: usize = 1000;

/// `?limit=&offset=` as accepted by the audit trail endpoint.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct TrailParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl TrailParams {
    /// Effective page size, clamped to [1, MAX_LIMIT].
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_TRAIL_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

/// A bare `?limit=` parameter.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct LimitParam {
    pub limit: Option<usize>,
}

impl LimitParam {
    /// Effective limit with the endpoint's default, clamped to [1, MAX_LIMIT].
    pub fn effective(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, MAX_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_defaults() {
        let p = TrailParams::default();
        assert_eq!(p.effective_limit(), DEFAULT_TRAIL_LIMIT);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn trail_limit_clamps() {
        let p = TrailParams {
            limit: Some(1_000_000),
            offset: Some(7),
        };
        assert_eq!(p.effective_limit(), MAX_LIMIT);
        assert_eq!(p.offset(), 7);

        let p = TrailParams {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(p.effective_limit(), 1);
    }

    #[test]
    fn limit_param_uses_endpoint_default() {
        let p = LimitParam { limit: None };
        assert_eq!(p.effective(DEFAULT_QUERY_LIMIT), 10);
        let p = LimitParam { limit: Some(3) };
        assert_eq!(p.effective(DEFAULT_QUERY_LIMIT), 3);
    }
}
