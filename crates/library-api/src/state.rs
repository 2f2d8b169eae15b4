//! Shared state handed to every handler: the registry facade plus the one
//! request-shape concern the API layer owns directly (pagination clamping),
//! since `page_size_max` is process configuration, not a domain rule.

use library_core::problemdetails::Problem;
use library_events::BusTransport;
use library_registry::RegistryService;

pub struct AppState<T: BusTransport> {
    pub registry: RegistryService<T>,
    pub page_size_max: u64,
}

impl<T: BusTransport> AppState<T> {
    pub fn new(registry: RegistryService<T>, page_size_max: u64) -> Self {
        Self {
            registry,
            page_size_max,
        }
    }
}

/// Normalizes `(page, page_size)` query params per §6's
/// `(page ≥ 1, page_size ∈ [1, page_size_max])`, rejecting an out-of-range
/// `page_size` outright rather than silently clamping it (§8's boundary
/// behaviors call for a 400/422, not a clamp, on this one).
pub fn normalize_pagination(
    page: Option<u64>,
    page_size: Option<u64>,
    page_size_max: u64,
) -> Result<(u64, u64), Problem> {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size.unwrap_or(20);

    if page_size == 0 || page_size > page_size_max {
        return Err(library_core::error_builder::bad_request()
            .detail(format!(
                "page_size must be between 1 and {page_size_max}, got {page_size}"
            ))
            .build());
    }

    Ok((page, page_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_page_and_page_size() {
        let (page, page_size) = normalize_pagination(None, None, 100).unwrap();
        assert_eq!(page, 1);
        assert_eq!(page_size, 20);
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(normalize_pagination(Some(1), Some(0), 100).is_err());
    }

    #[test]
    fn rejects_page_size_above_max() {
        assert!(normalize_pagination(Some(1), Some(500), 100).is_err());
    }

    #[test]
    fn floors_page_at_one() {
        let (page, _) = normalize_pagination(Some(0), Some(10), 100).unwrap();
        assert_eq!(page, 1);
    }
}
