use crate::core::equivalents::{compute, ProfileTable};
use crate::core::share_text::headline;
use crate::core::trophies::{milestone_reached, trophy_shelf};
use crate::domain::model::{ActivityTotals, DerivedEquivalents, ImpactSnapshot, Region, Trophy};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 「你的綠色影響」頁面需要的全部內容
#[derive(Debug, Clone, Serialize)]
pub struct ImpactSummary {
    pub display_name: String,
    pub region: Region,
    pub co2_saved_kg: f64,
    pub headline: String,
    pub milestone_reached: bool,
    pub equivalents: DerivedEquivalents,
    pub lines: Vec<String>,
    pub trophies: Vec<Trophy>,
    pub generated_at: DateTime<Utc>,
}

impl ImpactSummary {
    /// 每次都從最新的快照與選定地區重新計算
    pub fn build(
        snapshot: &ImpactSnapshot,
        region: Region,
        profiles: &ProfileTable,
        activity: &ActivityTotals,
    ) -> Self {
        let equivalents = compute(snapshot.co2_saved_kg(), profiles.get(region));
        let totals = ActivityTotals {
            co2_saved_kg: snapshot.co2_saved_kg(),
            ..*activity
        };

        Self {
            display_name: snapshot.display_name().to_string(),
            region,
            co2_saved_kg: snapshot.co2_saved_kg(),
            headline: headline(snapshot),
            milestone_reached: milestone_reached(snapshot.co2_saved_kg()),
            lines: equivalent_lines(&equivalents),
            equivalents,
            trophies: trophy_shelf(&totals),
            generated_at: Utc::now(),
        }
    }
}

pub fn equivalent_lines(equivalents: &DerivedEquivalents) -> Vec<String> {
    vec![
        format!(
            "Enough to power a home {} {}",
            equivalents.days_powered,
            plural(equivalents.days_powered, "day", "days")
        ),
        format!(
            "{} {} planted for a year",
            equivalents.trees_planted,
            plural(equivalents.trees_planted, "tree", "trees")
        ),
        format!("{} km of driving avoided", equivalents.km_driven),
    ]
}

fn plural(count: u64, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_for_default_snapshot() {
        let snapshot = ImpactSnapshot::new("Alex", 123.4).unwrap();
        let summary = ImpactSummary::build(
            &snapshot,
            Region::Germany,
            &ProfileTable::builtin(),
            &ActivityTotals::default(),
        );

        assert_eq!(summary.headline, "123.4 kg CO₂");
        assert!(summary.milestone_reached);
        assert_eq!(summary.lines[0], "Enough to power a home 8 days");
        assert_eq!(summary.lines[1], "6 trees planted for a year");
        assert_eq!(summary.lines[2], "771 km of driving avoided");
        assert_eq!(summary.trophies[0].title, "100 kg CO₂");
    }

    #[test]
    fn test_singular_wording() {
        let lines = equivalent_lines(&DerivedEquivalents {
            days_powered: 1,
            trees_planted: 1,
            km_driven: 1,
        });
        assert_eq!(lines[0], "Enough to power a home 1 day");
        assert_eq!(lines[1], "1 tree planted for a year");
    }

    #[test]
    fn test_region_change_recomputes() {
        let snapshot = ImpactSnapshot::new("Alex", 123.4).unwrap();
        let profiles = ProfileTable::builtin();
        let germany =
            ImpactSummary::build(&snapshot, Region::Germany, &profiles, &ActivityTotals::default());
        let us = ImpactSummary::build(
            &snapshot,
            Region::UnitedStates,
            &profiles,
            &ActivityTotals::default(),
        );
        assert_ne!(germany.equivalents, us.equivalents);
        assert_eq!(us.equivalents, compute(123.4, profiles.get(Region::UnitedStates)));
    }
}
