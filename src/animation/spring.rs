use crate::foundation::error::{ScrollfxError, ScrollfxResult};

const MAX_SUBSTEP_SECS: f64 = 1.0 / 240.0;
const MAX_SUBSTEPS: u32 = 1_000;

/// Damped-spring parameters used to smooth a mapped output.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Restoring force per unit displacement.
    pub stiffness: f64,
    /// Velocity damping.
    pub damping: f64,
    /// Simulated mass.
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Displacement below which the spring may come to rest.
    #[serde(default = "default_rest")]
    pub rest_delta: f64,
    /// Speed below which the spring may come to rest.
    #[serde(default = "default_rest")]
    pub rest_speed: f64,
}

fn default_mass() -> f64 {
    1.0
}

fn default_rest() -> f64 {
    0.01
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: default_mass(),
            rest_delta: default_rest(),
            rest_speed: default_rest(),
        }
    }
}

impl SpringConfig {
    /// Spring with the given stiffness and damping and default mass/rest thresholds.
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            ..Self::default()
        }
    }

    /// Validate that every parameter is finite and in range.
    pub fn validate(&self) -> ScrollfxResult<()> {
        for (name, v) in [
            ("stiffness", self.stiffness),
            ("mass", self.mass),
            ("rest_delta", self.rest_delta),
            ("rest_speed", self.rest_speed),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ScrollfxError::configuration(format!(
                    "spring {name} must be finite and > 0"
                )));
            }
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(ScrollfxError::configuration(
                "spring damping must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Largest integration step that keeps semi-implicit Euler stable for these
    /// parameters.
    fn substep_secs(&self) -> f64 {
        let omega = (self.stiffness / self.mass).sqrt();
        let decay = self.damping / self.mass;
        MAX_SUBSTEP_SECS.min(0.5 / omega).min(if decay > 0.0 {
            0.5 / decay
        } else {
            f64::INFINITY
        })
    }
}

/// Stateful follower that eases toward a moving target value.
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: Option<f64>,
    velocity: f64,
    settled: bool,
}

impl Spring {
    /// Create a spring; it snaps to the first target it sees.
    pub fn new(config: SpringConfig) -> ScrollfxResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            value: None,
            velocity: 0.0,
            settled: true,
        })
    }

    /// Current value, if the spring has seen a target yet.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// True when the value rests on the last target.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advance by `dt_secs` toward `target` and return the new value.
    ///
    /// A non-finite `dt_secs` snaps to `target`. Each call integrates at most
    /// a bounded number of substeps; time beyond that is dropped.
    pub fn step(&mut self, target: f64, dt_secs: f64) -> f64 {
        let Some(mut x) = self.value else {
            return self.snap(target);
        };
        if !dt_secs.is_finite() {
            return self.snap(target);
        }

        let SpringConfig {
            stiffness,
            damping,
            mass,
            rest_delta,
            rest_speed,
        } = self.config;

        let h = self.config.substep_secs();
        let mut v = self.velocity;
        let mut remaining = dt_secs.max(0.0);
        let mut substeps = 0;
        while remaining > 0.0 && substeps < MAX_SUBSTEPS {
            let h = remaining.min(h);
            let accel = (-stiffness * (x - target) - damping * v) / mass;
            v += accel * h;
            x += v * h;
            remaining -= h;
            substeps += 1;
        }

        if !(x.is_finite() && v.is_finite()) {
            tracing::debug!(to = target, "spring diverged; snapping to target");
            return self.snap(target);
        }

        if (x - target).abs() < rest_delta && v.abs() < rest_speed {
            x = target;
            v = 0.0;
            self.settled = true;
        } else {
            self.settled = false;
        }

        self.value = Some(x);
        self.velocity = v;
        x
    }

    fn snap(&mut self, target: f64) -> f64 {
        self.value = Some(target);
        self.velocity = 0.0;
        self.settled = true;
        target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
