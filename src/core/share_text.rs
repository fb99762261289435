use crate::domain::model::ImpactSnapshot;

pub const SHARE_TITLE: &str = "Green Commute Milestone";
const FILE_PREFIX: &str = "green-commute-";

/// 分享文字：名稱、四捨五入到一位小數的節省量，最後一定接頁面網址
pub fn compose_share_text(snapshot: &ImpactSnapshot, page_url: &str) -> String {
    format!(
        "{} just saved {} kg of CO₂ with Green Commute! 🌿\nJoin me: {}",
        snapshot.display_name(),
        to_fixed_one(snapshot.co2_saved_kg()),
        page_url
    )
}

/// `"Alex  Doe"` -> `green-commute-alex-doe.png`
///
/// 空白與檔名不允許的字元 (`/`、`\`、`:` 等) 視為分隔，連續出現只留一個 `-`。
pub fn share_file_name(display_name: &str) -> String {
    let mut slug = String::with_capacity(display_name.len());
    let mut in_separator = false;
    for ch in display_name.chars() {
        if ch.is_whitespace() || is_reserved_in_file_name(ch) {
            if !in_separator {
                slug.push('-');
            }
            in_separator = true;
        } else {
            slug.extend(ch.to_lowercase());
            in_separator = false;
        }
    }
    format!("{}{}.png", FILE_PREFIX, slug)
}

fn is_reserved_in_file_name(ch: char) -> bool {
    ch.is_control() || matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

/// 四捨五入到一位小數。
///
/// 以浮點數的精確十進位值判斷，剛好一半時往大的方向進位。
pub fn to_fixed_one(value: f64) -> String {
    // 只有 m/4 (m 為奇數) 的值乘十後會剛好落在 .5
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        // 奇數的 quarters 一定小於 2^53，乘 5 不會溢位
        let tenths = (quarters as u64 * 5 + 1) / 2;
        return format!("{}.{}", tenths / 10, tenths % 10);
    }
    format!("{:.1}", value)
}

/// 最多一位小數、千分位分隔、去掉結尾的 `.0`
pub fn format_kg_compact(value: f64) -> String {
    let fixed = to_fixed_one(value);
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0"));
    let whole = group_thousands(whole);
    match fraction {
        "0" => whole,
        fraction => format!("{}.{}", whole, fraction),
    }
}

pub fn headline(snapshot: &ImpactSnapshot) -> String {
    format!("{} kg CO₂", format_kg_compact(snapshot.co2_saved_kg()))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://greencommute.app/impact";

    #[test]
    fn test_share_text_rounds_to_one_decimal() {
        let snapshot = ImpactSnapshot::new("Alex", 123.45).unwrap();
        let text = compose_share_text(&snapshot, PAGE);
        assert!(text.contains("123.5 kg of CO₂"));
        assert!(text.starts_with("Alex just saved"));
        assert!(text.ends_with(PAGE));
    }

    #[test]
    fn test_share_text_keeps_trailing_zero() {
        let snapshot = ImpactSnapshot::new("Sam", 100.0).unwrap();
        let text = compose_share_text(&snapshot, PAGE);
        assert_eq!(
            text,
            format!(
                "Sam just saved 100.0 kg of CO₂ with Green Commute! 🌿\nJoin me: {}",
                PAGE
            )
        );
    }

    #[test]
    fn test_file_name_slug() {
        assert_eq!(share_file_name("Alex Doe"), "green-commute-alex-doe.png");
        assert_eq!(share_file_name("Alex    Doe"), "green-commute-alex-doe.png");
        assert_eq!(share_file_name("Alex\t \nDoe"), "green-commute-alex-doe.png");
        assert_eq!(share_file_name("ÉLISE"), "green-commute-élise.png");
    }

    #[test]
    fn test_file_name_replaces_path_separators() {
        assert_eq!(share_file_name("AC/DC Fan"), "green-commute-ac-dc-fan.png");
        assert_eq!(share_file_name("AC / DC"), "green-commute-ac-dc.png");
        assert_eq!(share_file_name(r"back\slash"), "green-commute-back-slash.png");
        assert_eq!(share_file_name("a:b*c?"), "green-commute-a-b-c-.png");
        assert_eq!(share_file_name(".."), "green-commute-...png");
    }

    #[test]
    fn test_half_tenths_round_up() {
        assert_eq!(to_fixed_one(0.25), "0.3");
        assert_eq!(to_fixed_one(123.25), "123.3");
        assert_eq!(to_fixed_one(0.75), "0.8");
        // 1.45 實際存成 1.4499…，不是剛好一半
        assert_eq!(to_fixed_one(1.45), "1.4");
        assert_eq!(to_fixed_one(0.0), "0.0");
        assert_eq!(to_fixed_one(2.0), "2.0");
    }

    #[test]
    fn test_share_text_and_headline_agree_on_ties() {
        for (co2, figure) in [(0.25, "0.3"), (123.25, "123.3"), (1.45, "1.4")] {
            let snapshot = ImpactSnapshot::new("Alex", co2).unwrap();
            let text = compose_share_text(&snapshot, PAGE);
            assert!(text.contains(&format!("saved {} kg of CO₂", figure)), "{}", text);
            assert_eq!(headline(&snapshot), format!("{} kg CO₂", figure));
        }
    }

    #[test]
    fn test_format_kg_compact() {
        assert_eq!(format_kg_compact(123.4), "123.4");
        assert_eq!(format_kg_compact(100.0), "100");
        assert_eq!(format_kg_compact(1234.56), "1,234.6");
        assert_eq!(format_kg_compact(1_000_000.0), "1,000,000");
        assert_eq!(format_kg_compact(0.04), "0");
        assert_eq!(format_kg_compact(99.96), "100");
    }

    #[test]
    fn test_headline() {
        let snapshot = ImpactSnapshot::new("Alex", 123.4).unwrap();
        assert_eq!(headline(&snapshot), "123.4 kg CO₂");
    }
}
