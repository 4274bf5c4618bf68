use criterion::{black_box, criterion_group, criterion_main, Criterion};
use graves_chirp_detector::prelude::*;

struct NullSink;
impl ChirpSink for NullSink {
    fn on_chirp(&mut self, _record: ChirpRecord) -> bool {
        true
    }
}

fn tone(sample_rate: f32, freq_hz: f32, n: usize) -> Vec<Complex32> {
    (0..n)
        .map(|i| {
            let phase = std::f32::consts::TAU * freq_hz * i as f32 / sample_rate;
            Complex32::new(phase.cos(), phase.sin())
        })
        .collect()
}

fn feed_silence_bench(n: usize) -> u64 {
    let params = DetectorParams::graves_defaults(8000.0).unwrap();
    let mut det = Detector::new(params, NullSink).unwrap();
    let samples = vec![Complex32::default(); n];
    det.feed_batch(&samples).unwrap();
    det.samples_fed()
}

fn feed_tone_bench(n: usize) -> u64 {
    let params = DetectorParams::graves_defaults(8000.0).unwrap();
    let mut det = Detector::new(params, NullSink).unwrap();
    let samples = tone(8000.0, 0.0, n);
    det.feed_batch(&samples).unwrap();
    det.samples_fed()
}

fn feed_one_at_a_time_bench(n: usize) -> u64 {
    let params = DetectorParams::graves_defaults(8000.0).unwrap();
    let mut det = Detector::new(params, NullSink).unwrap();
    for s in tone(8000.0, 0.0, n) {
        det.feed(s).unwrap();
    }
    det.samples_fed()
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("feed_batch_silence_8k", |b| {
        b.iter(|| feed_silence_bench(black_box(8000)))
    });
    c.bench_function("feed_batch_tone_8k", |b| b.iter(|| feed_tone_bench(black_box(8000))));
    c.bench_function("feed_one_at_a_time_8k", |b| {
        b.iter(|| feed_one_at_a_time_bench(black_box(8000)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
