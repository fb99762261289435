// 使用者看到的通知文字

use crate::domain::model::Notification;

pub fn card_saved() -> Notification {
    Notification::success("Share card saved!", "Share it on your favorite social apps.")
}

pub fn render_failed() -> Notification {
    Notification::failure("Could not generate image", "Please try again.")
}

pub fn shared_with_image() -> Notification {
    Notification::success("Shared!", "Thanks for inspiring others.")
}

pub fn shared_text_only() -> Notification {
    Notification::success("Shared!", "Image download is available if needed.")
}

pub fn download_ready() -> Notification {
    Notification::success(
        "Download ready",
        "Upload the image to Instagram or your favorite app.",
    )
}

pub fn share_unavailable() -> Notification {
    Notification::failure(
        "Sharing not available",
        "We couldn't open the share menu. Try downloading the image instead.",
    )
}

pub fn link_failed(platform: &str) -> Notification {
    Notification::failure(
        "Could not open link",
        &format!("We couldn't open {}. Try downloading the image instead.", platform),
    )
}
