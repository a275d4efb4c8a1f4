use chrono::{DateTime, Local, TimeDelta};
use rand::Rng;

use super::models::{
    AnalysisResult, Direction, DirectionFlow, LOCATIONS, RealTimeStats, Severity, TrafficFlow,
    ViolationKind, ViolationRecord,
};

const PROVINCES: [char; 5] = ['京', '沪', '粤', '川', '浙'];
const PLATE_LETTERS: &[u8] = b"ABCDEFGHJK";

const BASE_PROBABILITY: u32 = 5;
const VIOLATION_PENALTY: u32 = 3;
const HIGH_SEVERITY_PENALTY: u32 = 10;
const MAX_PROBABILITY: u32 = 100;

/// Reported in `real_time_stats` regardless of the sampled flow.
const REPORTED_AVERAGE_SPEED: u32 = 45;

const TIME_FORMAT: &str = "%H:%M:%S";

/// Synthesizes a plate such as `粤C04217`. No uniqueness guarantee.
pub fn generate_license_plate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut plate = String::with_capacity(10);
    plate.push(PROVINCES[rng.random_range(0..PROVINCES.len())]);
    plate.push(char::from(PLATE_LETTERS[rng.random_range(0..PLATE_LETTERS.len())]));
    for _ in 0..5 {
        plate.push(char::from(b'0' + rng.random_range(0..10u8)));
    }
    plate
}

/// Produces 2 to 6 independent violation records observed within the last
/// half hour before `now`.
pub fn generate_violations<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Local>,
) -> Vec<ViolationRecord> {
    let count = rng.random_range(2..=6);

    (0..count)
        .map(|_| {
            let kind = ViolationKind::ALL[rng.random_range(0..ViolationKind::ALL.len())];
            let minutes_ago = rng.random_range(1..=30);
            ViolationRecord {
                kind,
                license_plate: generate_license_plate(rng),
                description: kind.description().to_string(),
                severity: kind.severity(),
                timestamp: (now - TimeDelta::minutes(minutes_ago))
                    .format(TIME_FORMAT)
                    .to_string(),
                location: LOCATIONS[rng.random_range(0..LOCATIONS.len())].to_string(),
            }
        })
        .collect()
}

pub fn generate_traffic_flow<R: Rng + ?Sized>(rng: &mut R) -> TrafficFlow {
    Direction::ALL
        .iter()
        .map(|&direction| {
            let flow = DirectionFlow {
                vehicle_count: rng.random_range(50..=200),
                average_speed: rng.random_range(30..=70),
            };
            (direction, flow)
        })
        .collect()
}

pub fn accident_probability(violations: &[ViolationRecord]) -> u32 {
    let total = violations.len() as u32;
    let high = violations
        .iter()
        .filter(|v| v.severity == Severity::High)
        .count() as u32;

    (BASE_PROBABILITY + total * VIOLATION_PENALTY + high * HIGH_SEVERITY_PENALTY)
        .min(MAX_PROBABILITY)
}

fn count_kind_containing(violations: &[ViolationRecord], needle: &str) -> usize {
    violations
        .iter()
        .filter(|v| v.kind.as_str().contains(needle))
        .count()
}

/// Runs every generator once and aggregates the summary block.
pub fn build_analysis<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Local>) -> AnalysisResult {
    let violations = generate_violations(rng, now);
    let traffic_flow = generate_traffic_flow(rng);
    let accident_probability = accident_probability(&violations);

    let real_time_stats = RealTimeStats {
        vehicle_count: traffic_flow.values().map(|f| f.vehicle_count).sum(),
        average_speed: REPORTED_AVERAGE_SPEED,
        violation_count: violations.len(),
        red_light_violations: count_kind_containing(&violations, "red_light"),
        reverse_violations: count_kind_containing(&violations, "reverse"),
        timestamp: now.format(TIME_FORMAT).to_string(),
    };

    AnalysisResult {
        violations,
        traffic_flow,
        accident_probability,
        real_time_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record(kind: ViolationKind) -> ViolationRecord {
        ViolationRecord {
            kind,
            license_plate: "京A12345".to_string(),
            description: kind.description().to_string(),
            severity: kind.severity(),
            timestamp: "12:00:00".to_string(),
            location: LOCATIONS[0].to_string(),
        }
    }

    #[test]
    fn plate_has_province_letter_and_five_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let plate = generate_license_plate(&mut rng);
            let chars: Vec<char> = plate.chars().collect();
            assert_eq!(chars.len(), 7, "plate {plate}");
            assert!(PROVINCES.contains(&chars[0]));
            assert!(PLATE_LETTERS.contains(&(chars[1] as u8)));
            assert!(chars[2..].iter().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn violations_stay_within_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = Local::now();
        for _ in 0..200 {
            let violations = generate_violations(&mut rng, now);
            assert!((2..=6).contains(&violations.len()));
            for v in &violations {
                assert_eq!(v.severity, v.kind.severity());
                assert_eq!(v.description, v.kind.description());
                assert!(LOCATIONS.contains(&v.location.as_str()));
                assert!(chrono::NaiveTime::parse_from_str(&v.timestamp, TIME_FORMAT).is_ok());
            }
        }
    }

    #[test]
    fn violation_timestamps_are_in_the_past_half_hour() {
        let mut rng = StdRng::seed_from_u64(3);
        let now = Local::now();
        let allowed: Vec<String> = (1..=30)
            .map(|m| (now - TimeDelta::minutes(m)).format(TIME_FORMAT).to_string())
            .collect();
        for v in generate_violations(&mut rng, now) {
            assert!(allowed.contains(&v.timestamp), "unexpected {}", v.timestamp);
        }
    }

    #[test]
    fn traffic_flow_covers_four_directions_within_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let flow = generate_traffic_flow(&mut rng);
            let keys: Vec<Direction> = flow.keys().copied().collect();
            assert_eq!(keys, Direction::ALL.to_vec());
            for f in flow.values() {
                assert!((50..=200).contains(&f.vehicle_count));
                assert!((30..=70).contains(&f.average_speed));
            }
        }
    }

    #[test]
    fn catalogue_uses_the_published_wire_strings() {
        assert_eq!(ViolationKind::RunRedLight.description(), "闯红灯");
        assert_eq!(ViolationKind::NoPedestrianYield.description(), "未礼让行人");
        assert_eq!(LOCATIONS, ["南北路口", "东西路口", "人行横道", "十字路口中心"]);

        let mut rng = StdRng::seed_from_u64(21);
        let value = serde_json::to_value(generate_violations(&mut rng, Local::now())).unwrap();
        let first = &value[0];
        let kind = ViolationKind::ALL
            .into_iter()
            .find(|k| first["type"] == k.as_str())
            .unwrap();
        assert_eq!(first["description"], kind.description());
    }

    #[test]
    fn probability_adds_penalties() {
        let violations = vec![
            record(ViolationKind::Speeding),
            record(ViolationKind::RunYellowLight),
        ];
        // 5 + 2 * 3 + 1 * 10
        assert_eq!(accident_probability(&violations), 21);
        assert_eq!(accident_probability(&[]), 5);
    }

    #[test]
    fn probability_is_capped() {
        let violations = vec![record(ViolationKind::ReverseDriving); 10];
        assert_eq!(accident_probability(&violations), 100);
    }

    #[test]
    fn analysis_summary_matches_its_parts() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let result = build_analysis(&mut rng, Local::now());
            let stats = &result.real_time_stats;

            let flow_total: u32 = result.traffic_flow.values().map(|f| f.vehicle_count).sum();
            assert_eq!(stats.vehicle_count, flow_total);
            assert_eq!(stats.average_speed, 45);
            assert_eq!(stats.violation_count, result.violations.len());
            assert_eq!(
                stats.red_light_violations,
                result
                    .violations
                    .iter()
                    .filter(|v| v.kind == ViolationKind::RunRedLight)
                    .count()
            );
            assert_eq!(
                stats.reverse_violations,
                result
                    .violations
                    .iter()
                    .filter(|v| v.kind == ViolationKind::ReverseDriving)
                    .count()
            );
            assert!((5..=100).contains(&result.accident_probability));
        }
    }

    #[test]
    fn serializes_with_wire_names() {
        let mut rng = StdRng::seed_from_u64(5);
        let value = serde_json::to_value(build_analysis(&mut rng, Local::now())).unwrap();

        let first = &value["violations"][0];
        let kind = first["type"].as_str().unwrap();
        assert!(ViolationKind::ALL.iter().any(|k| k.as_str() == kind));
        assert!(matches!(first["severity"].as_str(), Some("high" | "medium")));

        let flow = value["traffic_flow"].as_object().unwrap();
        let mut keys: Vec<&str> = flow.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["east", "north", "south", "west"]);
    }
}
