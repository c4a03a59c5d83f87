use crate::ui::viewmodel::EmptyState;

#[must_use]
pub fn render_empty_state(empty: &EmptyState) -> String {
    if empty.subtitle.is_empty() {
        empty.message.clone()
    } else {
        format!("{}\n{}", empty.message, empty.subtitle)
    }
}
