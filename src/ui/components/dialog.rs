use crate::ui::viewmodel::DialogInfo;

#[must_use]
pub fn render_dialog(dialog: &DialogInfo) -> String {
    let mut out = format!("Change status of {}", dialog.target_id);
    if dialog.submitting {
        out.push_str(" (saving...)");
    }
    if let Some(error) = &dialog.error {
        out.push_str("\n  ");
        out.push_str(error);
    }
    out
}
