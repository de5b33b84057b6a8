use rand::Rng;
use rand_distr::StandardNormal;

/// Geometric Brownian motion under the risk-neutral measure,
/// `dS = r S dt + sigma S dW`.
#[derive(Debug, Clone, Copy)]
pub struct GbmProcess {
    pub spot: f64,
    pub rate: f64,
    pub volatility: f64,
}

impl GbmProcess {
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
        }
    }

    /// Simulates one discretized path of `num_steps` increments, returning
    /// `num_steps + 1` spots starting at `self.spot`. The buffer is owned by
    /// the caller's trial and draws come from the caller's RNG, so trials
    /// stay independent.
    pub fn path<R: Rng + ?Sized>(&self, num_steps: usize, dt: f64, rng: &mut R) -> Vec<f64> {
        let drift = (self.rate - 0.5 * self.volatility * self.volatility) * dt;
        let diffusion = self.volatility * dt.sqrt();

        let mut path = Vec::with_capacity(num_steps + 1);
        let mut spot = self.spot;
        path.push(spot);
        for _ in 0..num_steps {
            let z: f64 = rng.sample(StandardNormal);
            spot *= (drift + diffusion * z).exp();
            path.push(spot);
        }
        path
    }
}
