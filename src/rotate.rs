/// Goal payload for the rotation action: turn by `angle` radians without
/// exceeding `max_rotation_speed` radians per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationGoal {
    pub angle: f64,
    pub max_rotation_speed: f64,
}

impl RotationGoal {
    pub fn new(angle: f64, max_rotation_speed: f64) -> Self {
        Self {
            angle,
            max_rotation_speed,
        }
    }

    /// One full revolution at the given speed.
    pub fn full_turn(max_rotation_speed: f64) -> Self {
        Self::new(std::f64::consts::TAU, max_rotation_speed)
    }
}
