use capd_emulator::acquisition::EventQueue;
use capd_emulator::config::EmulatorConfig;
use capd_emulator::hal::{Module, ModuleEnvironment, ModuleType, Quantum, SignalGenerator, VitalSigns};
use capd_emulator::legacy::{ModuleRecord, QuantumRecord};
use capd_emulator::processing::{forward, inverse};
use capd_emulator::utils::time::MockTimeProvider;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rustfft::num_complex::Complex64;
use std::sync::Arc;

const SAMPLE_RATES: &[u32] = &[250, 1000, 2232, 4000];
const TRANSFORM_SIZES: &[usize] = &[64, 256, 800, 1024];

fn generator(module_type: ModuleType, frequency_hz: u32) -> SignalGenerator {
    let vitals = Arc::new(VitalSigns::default());
    let environment = ModuleEnvironment {
        config: Arc::new(EmulatorConfig::default()),
        queue: Arc::new(EventQueue::default()),
        clock: Arc::new(MockTimeProvider::new(0)),
        pulse_context: vitals.clone(),
        pressure_context: vitals.clone(),
    };
    let parameters = Module::new(module_type, &environment).parameters().to_vec();
    let generator = SignalGenerator::for_module(module_type, &environment.config, &parameters, vitals.clone(), vitals);
    generator.prepare(frequency_hz);
    generator
}

fn benchmark_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generators");
    group.throughput(Throughput::Elements(1000));

    for module_type in [ModuleType::Pressure, ModuleType::Pulse, ModuleType::Ecg] {
        group.bench_function(BenchmarkId::new("calculate", format!("{:?}", module_type)), |b| {
            let generator = generator(module_type, 1000);
            let mut tick = 0u64;
            b.iter(|| {
                for _ in 0..1000 {
                    black_box(generator.calculate(tick));
                    tick += 1;
                }
            });
        });
    }

    for &rate in SAMPLE_RATES {
        group.bench_with_input(BenchmarkId::new("ecg_prepare", rate), &rate, |b, &rate| {
            let generator = generator(ModuleType::Ecg, rate);
            b.iter(|| generator.prepare(black_box(rate)));
        });
    }

    group.finish();
}

fn benchmark_fourier(c: &mut Criterion) {
    let mut group = c.benchmark_group("fourier");

    for &size in TRANSFORM_SIZES {
        let signal: Vec<Complex64> = (0..size).map(|i| Complex64::new((i as f64 * 0.1).sin(), 0.0)).collect();
        let spectrum = forward(&signal);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("forward", size), &signal, |b, signal| {
            b.iter(|| forward(black_box(signal)));
        });
        group.bench_with_input(BenchmarkId::new("inverse", size), &spectrum, |b, spectrum| {
            b.iter(|| inverse(black_box(spectrum), size));
        });
    }

    group.finish();
}

fn benchmark_event_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_queue");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("push_pop", |b| {
        let queue = EventQueue::default();
        b.iter(|| {
            for sample in 0..1000 {
                queue.push(Quantum::data(ModuleType::Ecg, (sample % 9) as u8, sample));
            }
            while let Some(quantum) = queue.try_pop() {
                black_box(quantum);
            }
        });
    });

    group.finish();
}

fn benchmark_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("legacy_records");

    let quantum = Quantum::data(ModuleType::Pressure, 0, 123_456);
    group.bench_function("quantum_encode", |b| {
        b.iter(|| QuantumRecord::from(black_box(&quantum)).encode());
    });

    let module = ModuleRecord {
        id: 5,
        module_type: 5,
        channel_count: 9,
        gain_factor: 0.0,
        spline_level: 0,
        version: 1,
        serial: 1_000_003,
        description: "ECG module".to_string(),
    };
    let bytes = module.encode();
    group.bench_function("module_decode", |b| {
        b.iter(|| ModuleRecord::decode(black_box(&bytes)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_generators,
    benchmark_fourier,
    benchmark_event_queue,
    benchmark_records
);
criterion_main!(benches);
