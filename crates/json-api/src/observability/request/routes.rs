//! Low-cardinality route labels for spans and metrics.

use uuid::Uuid;

/// Replace uuid path segments with `{uuid}` and drop any trailing slash.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_stays_root() {
        assert_eq!(route_label("/"), "/");
    }

    #[test]
    fn uuid_segments_are_collapsed() {
        let uuid = Uuid::now_v7();

        assert_eq!(
            route_label(&format!("/rescue-requests/{uuid}/accept/")),
            "/rescue-requests/{uuid}/accept"
        );
    }

    #[test]
    fn static_segments_are_kept() {
        assert_eq!(route_label("/cascade-runs"), "/cascade-runs");
    }
}
