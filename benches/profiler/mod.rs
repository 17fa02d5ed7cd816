// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion config with a flamegraph profiler attached (`--profile-time <secs>` to enable).
pub fn criterion() -> Criterion {
    let frequency = env_or::<i32>("CANOPY_PROFILE_FREQ", 100).clamp(1, 1000);
    let sample_size = env_or::<usize>("CANOPY_BENCH_SAMPLES", 50).clamp(10, 200);
    let warm_up = env_or::<u64>("CANOPY_BENCH_WARMUP_SECS", 2).clamp(1, 60);
    let measurement = env_or::<u64>("CANOPY_BENCH_MEASUREMENT_SECS", 4).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warm_up))
        .measurement_time(Duration::from_secs(measurement))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
