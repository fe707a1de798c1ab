//! Command encoding benchmarks.
//!
//! Measures the per-call cost of turning block arguments into wire text:
//! - Color clamping
//! - Command formatting
//! - Descriptor serialization
//!
//! Run with: cargo bench --bench command_format
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use owls_client::{AutoShow, Color, Command, Descriptor, Locale, ShiftDirection};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const STRIP_LENGTHS: &[u32] = &[8, 60, 300];

// ============================================================================
// Benchmark: Color Clamping
// ============================================================================

fn bench_color_clamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("color_clamp");

    group.bench_function("in_range", |b| {
        b.iter(|| Color::clamped(black_box(12.0), black_box(128.5), black_box(254.9)));
    });

    group.bench_function("out_of_range", |b| {
        b.iter(|| Color::clamped(black_box(-40.0), black_box(1.0e6), black_box(f64::NAN)));
    });

    group.finish();
}

// ============================================================================
// Benchmark: Command Formatting
// ============================================================================

fn bench_command_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_format");

    let commands = [
        Command::Clear,
        Command::SetPixels(Color::new(255, 128, 0)),
        Command::AutoShow(AutoShow::Off),
        Command::Shift(ShiftDirection::Left),
        Command::Dim(3),
    ];
    for command in commands {
        group.bench_with_input(
            BenchmarkId::new("single", command.name()),
            &command,
            |b, command| b.iter(|| black_box(command).to_string()),
        );
    }

    // One full frame: every pixel set, then show.
    for &length in STRIP_LENGTHS {
        group.bench_with_input(BenchmarkId::new("frame", length), &length, |b, &length| {
            b.iter(|| {
                let mut frame = Vec::with_capacity(length as usize + 1);
                for index in 0..length {
                    let shade = (index * 255 / length) as f64;
                    let command = Command::SetPixel {
                        index,
                        color: Color::clamped(shade, 0.0, 255.0 - shade),
                    };
                    frame.push(command.to_string());
                }
                frame.push(Command::Show.to_string());
                frame
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Descriptor
// ============================================================================

fn bench_descriptor(c: &mut Criterion) {
    let mut group = c.benchmark_group("descriptor");

    for locale in [Locale::English, Locale::Dutch] {
        let descriptor = Descriptor::for_locale(locale);
        group.bench_with_input(
            BenchmarkId::new("to_json", format!("{locale:?}")),
            &descriptor,
            |b, descriptor| b.iter(|| descriptor.to_json()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_color_clamp,
    bench_command_format,
    bench_descriptor
);
criterion_main!(benches);
