use std::time::Instant;

use glam::Vec3;
use skyshade_config::ResolvedConfig;
use skyshade_render::{DefaultShader, RenderError};

use crate::scenes::SceneConfig;

/// Height of the cloud plane above the camera, blocks.
const CLOUD_PLANE_HEIGHT: f32 = 128.0;

/// Frame step of the scene clock, seconds.
const FRAME_DT: f32 = 1.0 / 60.0;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    /// Mean cost of one fragment, nanoseconds.
    pub ns_per_fragment: f64,
    /// FNV-1a hash of the first frame's uniform block and output bits.
    pub checksum: u64,
    pub timings: TimingSeries,
}

/// Renders equirectangular panoramas of each scene on the CPU.
pub struct BenchmarkRunner {
    shader: DefaultShader,
    width: u32,
    height: u32,
    frame_count: u32,
}

impl BenchmarkRunner {
    pub fn new(
        resolved: &ResolvedConfig,
        width: u32,
        height: u32,
        frame_count: u32,
    ) -> Result<Self, RenderError> {
        Ok(Self {
            shader: DefaultShader::new(resolved)?,
            width: width.max(1),
            height: height.max(1),
            frame_count,
        })
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, config: &SceneConfig) -> BenchmarkResult {
        log::info!(
            "Running scene '{}' ({}x{}, {} frames)...",
            config.name,
            self.width,
            self.height,
            self.frame_count
        );

        let mut frame_times = Vec::with_capacity(self.frame_count as usize);
        let mut checksum = 0;

        for frame in 0..self.frame_count {
            let time = config.start_time + frame as f32 * FRAME_DT;

            let frame_start = Instant::now();
            let hash = self.render_frame(config, time);
            let elapsed = frame_start.elapsed().as_secs_f64() * 1000.0;

            if frame == 0 {
                checksum = hash;
            }
            frame_times.push(elapsed);
        }

        let timings = compute_timings(&frame_times);
        let fragments = f64::from(self.width) * f64::from(self.height);
        let ns_per_fragment = timings.mean_ms * 1.0e6 / fragments;
        log::info!(
            "  Done: mean={:.2}ms, p95={:.2}ms, {:.1}ns/fragment, checksum={:016x}",
            timings.mean_ms,
            timings.p95_ms,
            ns_per_fragment,
            checksum
        );

        BenchmarkResult {
            scene_name: config.name.to_string(),
            width: self.width,
            height: self.height,
            frame_count: self.frame_count,
            ns_per_fragment,
            checksum,
            timings,
        }
    }

    /// Shade every pixel of one frame and hash the uniform block followed
    /// by the output.
    pub fn render_frame(&self, config: &SceneConfig, time: f32) -> u64 {
        let frame = self
            .shader
            .frame_uniforms(&config.environment(), config.fog(), time);

        let mut hash = fnv1a(FNV_OFFSET, frame.as_bytes());
        for y in 0..self.height {
            for x in 0..self.width {
                let view_dir = panorama_dir(x, y, self.width, self.height);
                let col = self.shader.shade(&frame, view_dir, cloud_plane_point(view_dir));
                for c in col.to_array() {
                    hash = fnv1a(hash, &c.to_bits().to_le_bytes());
                }
            }
        }
        hash
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

fn fnv1a(hash: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(hash, |h, b| (h ^ u64::from(*b)).wrapping_mul(FNV_PRIME))
}

/// Equirectangular view direction for pixel `(x, y)`; row 0 looks straight up.
pub fn panorama_dir(x: u32, y: u32, width: u32, height: u32) -> Vec3 {
    let yaw = (x as f32 + 0.5) / width as f32 * std::f32::consts::TAU;
    let pitch = (0.5 - (y as f32 + 0.5) / height as f32) * std::f32::consts::PI;
    let (sp, cp) = pitch.sin_cos();
    let (sy, cy) = yaw.sin_cos();
    Vec3::new(cp * cy, sp, cp * sy)
}

/// Camera-relative point where the view ray meets the cloud plane (mirrored
/// for rays below the horizon).
pub fn cloud_plane_point(view_dir: Vec3) -> Vec3 {
    view_dir * (CLOUD_PLANE_HEIGHT / view_dir.y.abs().max(0.05))
}

/// Compute timing statistics from a list of frame times in milliseconds.
fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
