use crate::core::share_text::headline;
use crate::domain::model::ImpactSnapshot;

pub const CARD_SIZE_PX: u32 = 1080;

/// 固定版面的正方形分享卡 (SVG，邏輯像素)；光柵化時再乘上像素比
#[derive(Debug, Clone, PartialEq)]
pub struct ShareCard {
    pub width: u32,
    pub height: u32,
    pub svg: String,
}

impl ShareCard {
    /// 依快照填入模板；不會修改快照本身
    pub fn from_snapshot(snapshot: &ImpactSnapshot) -> Self {
        let headline = escape_xml(&headline(snapshot));
        let tagline = escape_xml(&format!(
            "{}, you're making the Earth smile!",
            snapshot.display_name()
        ));

        let svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">
  <defs>
    <linearGradient id="bg" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="#16a34a"/>
      <stop offset="100%" stop-color="#0d9488"/>
    </linearGradient>
  </defs>
  <rect x="0" y="0" width="{size}" height="{size}" rx="32" fill="url(#bg)"/>
  <g font-family="sans-serif" fill="#ffffff">
    <path d="M96 150 C96 110 130 84 176 84 C176 128 146 150 112 150 Z" fill-opacity="0.9"/>
    <text x="196" y="132" font-size="36" font-weight="600" letter-spacing="1">Green Commute</text>
    <circle cx="956" cy="116" r="32" fill="none" stroke="#ffffff" stroke-width="6" stroke-opacity="0.7"/>
    <text x="540" y="420" font-size="28" text-anchor="middle" letter-spacing="6" fill-opacity="0.9">YOUR GREEN IMPACT</text>
    <text x="540" y="560" font-size="112" font-weight="800" text-anchor="middle">{headline}</text>
    <text x="540" y="660" font-size="40" text-anchor="middle" fill-opacity="0.9">{tagline}</text>
    <text x="96" y="984" font-size="28" fill-opacity="0.9">#GreenCommute</text>
    <text x="984" y="984" font-size="28" text-anchor="end" fill-opacity="0.9">Share your milestone • Inspire others</text>
  </g>
</svg>"##,
            size = CARD_SIZE_PX,
            headline = headline,
            tagline = tagline,
        );

        Self {
            width: CARD_SIZE_PX,
            height: CARD_SIZE_PX,
            svg,
        }
    }
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
