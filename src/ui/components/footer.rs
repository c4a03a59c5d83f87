use crate::ui::viewmodel::FooterInfo;

/// `Page 2 of 3 · 25 of 40 records`; the second count is omitted when no
/// filter removed anything.
#[must_use]
pub fn render_footer(footer: &FooterInfo) -> String {
    let counts = if footer.filtered_count == footer.loaded_count {
        format!("{} records", footer.loaded_count)
    } else {
        format!("{} of {} records", footer.filtered_count, footer.loaded_count)
    };
    format!("Page {} of {} · {counts}", footer.page_number, footer.page_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_shows_filtered_share() {
        let footer = FooterInfo {
            page_number: 1,
            page_count: 1,
            filtered_count: 5,
            loaded_count: 12,
        };
        assert_eq!(render_footer(&footer), "Page 1 of 1 · 5 of 12 records");
    }
}
