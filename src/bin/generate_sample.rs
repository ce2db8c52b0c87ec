use std::f64::consts::PI;

use anyhow::{Context, Result};
use hdf5::types::VarLenUnicode;

const SAMPLING_RATE: f64 = 1000.0;
const DURATION_S: f64 = 60.0;
const N_ELECTRODES: usize = 128;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// Theta rhythm throughout, a gamma burst in the second half, plus noise.
fn synthetic_lfp(rng: &mut SimpleRng) -> Vec<f64> {
    let n = (SAMPLING_RATE * DURATION_S) as usize;
    (0..n)
        .map(|i| {
            let t = i as f64 / SAMPLING_RATE;
            let theta = 80e-6 * (2.0 * PI * 6.0 * t).sin();
            let gamma = if t >= DURATION_S / 2.0 {
                25e-6 * (2.0 * PI * 40.0 * t).sin()
            } else {
                0.0
            };
            theta + gamma + rng.gauss(0.0, 10e-6)
        })
        .collect()
}

/// Shank layout: contiguous blocks of electrodes per region.
fn electrode_locations() -> Vec<&'static str> {
    let regions = ["CA1", "CA3", "DG", "TH"];
    (0..N_ELECTRODES)
        .map(|i| regions[i * regions.len() / N_ELECTRODES])
        .collect()
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_data.nwb";

    let file = hdf5::File::create(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    // general/extracellular_ephys/electrodes/location
    let locations: Vec<VarLenUnicode> = electrode_locations()
        .iter()
        .map(|l| {
            l.parse::<VarLenUnicode>()
                .map_err(|_| anyhow::anyhow!("invalid electrode label {l:?}"))
        })
        .collect::<Result<_>>()?;
    file.create_group("general")?
        .create_group("extracellular_ephys")?
        .create_group("electrodes")?
        .new_dataset_builder()
        .with_data(locations.as_slice())
        .create("location")
        .context("writing electrode locations")?;

    // acquisition/LFP/{data, starting_time@rate}
    let lfp = synthetic_lfp(&mut rng);
    let series = file.create_group("acquisition")?.create_group("LFP")?;
    series
        .new_dataset_builder()
        .with_data(lfp.as_slice())
        .create("data")
        .context("writing LFP data")?;
    let starting_time = series.new_dataset::<f64>().shape(()).create("starting_time")?;
    starting_time.write_scalar(&0.0)?;
    starting_time
        .new_attr::<f64>()
        .shape(())
        .create("rate")?
        .write_scalar(&SAMPLING_RATE)?;

    println!(
        "Wrote {} electrodes and {} LFP samples at {SAMPLING_RATE} Hz to {output_path}",
        N_ELECTRODES,
        lfp.len()
    );
    Ok(())
}
