use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Speeding,
    RunRedLight,
    ReverseDriving,
    NoPedestrianYield,
    RunYellowLight,
}

impl ViolationKind {
    pub const ALL: [ViolationKind; 5] = [
        ViolationKind::Speeding,
        ViolationKind::RunRedLight,
        ViolationKind::ReverseDriving,
        ViolationKind::NoPedestrianYield,
        ViolationKind::RunYellowLight,
    ];

    /// Wire name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::Speeding => "speeding",
            ViolationKind::RunRedLight => "run_red_light",
            ViolationKind::ReverseDriving => "reverse_driving",
            ViolationKind::NoPedestrianYield => "no_pedestrian_yield",
            ViolationKind::RunYellowLight => "run_yellow_light",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ViolationKind::Speeding => "超速行驶",
            ViolationKind::RunRedLight => "闯红灯",
            ViolationKind::ReverseDriving => "逆向行驶",
            ViolationKind::NoPedestrianYield => "未礼让行人",
            ViolationKind::RunYellowLight => "黄灯加速",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            ViolationKind::Speeding | ViolationKind::RunRedLight | ViolationKind::ReverseDriving => {
                Severity::High
            }
            ViolationKind::NoPedestrianYield | ViolationKind::RunYellowLight => Severity::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

pub const LOCATIONS: [&str; 4] = [
    "南北路口",
    "东西路口",
    "人行横道",
    "十字路口中心",
];

#[derive(Debug, Clone, Serialize)]
pub struct ViolationRecord {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub license_plate: String,
    pub description: String,
    pub severity: Severity,
    pub timestamp: String,
    pub location: String,
}

// Declaration order doubles as the key order of the serialized map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DirectionFlow {
    pub vehicle_count: u32,
    pub average_speed: u32,
}

pub type TrafficFlow = BTreeMap<Direction, DirectionFlow>;

#[derive(Debug, Clone, Serialize)]
pub struct RealTimeStats {
    pub vehicle_count: u32,
    pub average_speed: u32,
    pub violation_count: usize,
    pub red_light_violations: usize,
    pub reverse_violations: usize,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub violations: Vec<ViolationRecord>,
    pub traffic_flow: TrafficFlow,
    pub accident_probability: u32,
    pub real_time_stats: RealTimeStats,
}
