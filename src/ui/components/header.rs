use crate::ui::viewmodel::HeaderInfo;

#[must_use]
pub fn render_header(header: &HeaderInfo) -> String {
    match &header.filters {
        Some(filters) => format!("{} [{filters}]", header.title),
        None => header.title.clone(),
    }
}

/// Error banner shown above the table. Rows loaded earlier stay visible below.
#[must_use]
pub fn render_banner(message: &str) -> String {
    format!("! {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lists_active_filters() {
        let header = HeaderInfo {
            title: "Client Users".to_string(),
            filters: Some("status=Pending".to_string()),
        };
        assert_eq!(render_header(&header), "Client Users [status=Pending]");
    }
}
