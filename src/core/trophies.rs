use crate::domain::model::{ActivityTotals, Trophy, TrophyStatus};

/// 達成里程碑 (飄落葉子動畫) 的門檻
pub const MILESTONE_KG: f64 = 100.0;

#[derive(Debug, Clone, Copy)]
enum Metric {
    Co2Kg,
    BikeTrips,
    BusRides,
    KmWalked,
    StreakDays,
}

struct TrophyDef {
    key: &'static str,
    title: &'static str,
    metric: Metric,
    threshold: f64,
}

const TROPHIES: [TrophyDef; 6] = [
    TrophyDef {
        key: "co2-100",
        title: "100 kg CO₂",
        metric: Metric::Co2Kg,
        threshold: 100.0,
    },
    TrophyDef {
        key: "bike-50",
        title: "50 Bike Trips",
        metric: Metric::BikeTrips,
        threshold: 50.0,
    },
    TrophyDef {
        key: "bus-30",
        title: "30 Bus Rides",
        metric: Metric::BusRides,
        threshold: 30.0,
    },
    TrophyDef {
        key: "walk-200",
        title: "200 km Walked",
        metric: Metric::KmWalked,
        threshold: 200.0,
    },
    TrophyDef {
        key: "co2-250",
        title: "250 kg CO₂",
        metric: Metric::Co2Kg,
        threshold: 250.0,
    },
    TrophyDef {
        key: "streak-30",
        title: "Green Streak 30d",
        metric: Metric::StreakDays,
        threshold: 30.0,
    },
];

fn metric_value(metric: Metric, totals: &ActivityTotals) -> f64 {
    match metric {
        Metric::Co2Kg => totals.co2_saved_kg,
        Metric::BikeTrips => f64::from(totals.bike_trips),
        Metric::BusRides => f64::from(totals.bus_rides),
        Metric::KmWalked => totals.km_walked,
        Metric::StreakDays => f64::from(totals.streak_days),
    }
}

/// 獎盃牆：已解鎖的排前面，其餘依定義順序
pub fn trophy_shelf(totals: &ActivityTotals) -> Vec<Trophy> {
    let (mut unlocked, upcoming): (Vec<Trophy>, Vec<Trophy>) = TROPHIES
        .iter()
        .map(|def| Trophy {
            key: def.key,
            title: def.title,
            status: if metric_value(def.metric, totals) >= def.threshold {
                TrophyStatus::Unlocked
            } else {
                TrophyStatus::Next
            },
        })
        .partition(|trophy| trophy.status == TrophyStatus::Unlocked);

    unlocked.extend(upcoming);
    unlocked
}

pub fn milestone_reached(co2_saved_kg: f64) -> bool {
    co2_saved_kg >= MILESTONE_KG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_unlocked_at_zero() {
        let shelf = trophy_shelf(&ActivityTotals::default());
        assert_eq!(shelf.len(), 6);
        assert!(shelf.iter().all(|t| t.status == TrophyStatus::Next));
        assert_eq!(shelf[0].key, "co2-100");
    }

    #[test]
    fn test_unlocked_sorted_first() {
        let totals = ActivityTotals {
            co2_saved_kg: 123.4,
            bike_trips: 50,
            bus_rides: 12,
            km_walked: 250.0,
            streak_days: 3,
        };
        let shelf = trophy_shelf(&totals);
        let keys: Vec<_> = shelf.iter().map(|t| t.key).collect();
        assert_eq!(
            keys,
            vec!["co2-100", "bike-50", "walk-200", "bus-30", "co2-250", "streak-30"]
        );
        assert_eq!(shelf[2].status, TrophyStatus::Unlocked);
        assert_eq!(shelf[3].status, TrophyStatus::Next);
    }

    #[test]
    fn test_milestone_threshold() {
        assert!(!milestone_reached(99.9));
        assert!(milestone_reached(100.0));
    }
}
