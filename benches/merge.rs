use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weather_compare::{
    build_table, normalize, DayId, LocationWeatherData, PrecipitationRecord, TemperatureRecord,
    WindRecord,
};

fn synthetic_location(name: &str, first_day: i64, days: i64) -> LocationWeatherData {
    let day = |i: i64| DayId::from_timestamp(1_704_103_200 + i * 86_400, 3_600);
    let range = first_day..first_day + days;
    LocationWeatherData {
        location_name: name.to_string(),
        coordinates: None,
        temperature: range
            .clone()
            .map(|i| {
                let base = (i % 30) as f64;
                TemperatureRecord {
                    day: day(i),
                    morning: Some(base),
                    day_temp: Some(base + 6.0),
                    evening: Some(base + 3.0),
                    night: Some(base - 2.0),
                    min: Some(base - 3.0),
                    max: Some(base + 7.0),
                    average: None,
                }
            })
            .collect(),
        precipitation: range
            .clone()
            .map(|i| PrecipitationRecord {
                day: day(i),
                rain: (i % 5) as f64,
                snow: 0.0,
                probability: 0.5,
            })
            .collect(),
        wind: range
            .map(|i| WindRecord {
                day: day(i),
                speed: (i % 12) as f64,
                degrees: (i * 17 % 360) as f64,
            })
            .collect(),
    }
}

fn bench_merge(c: &mut Criterion) {
    let locations: Vec<LocationWeatherData> = (0..4)
        .map(|i| synthetic_location(&format!("Location {i}"), i * 10, 365))
        .collect();

    c.bench_function("build_table", |b| {
        b.iter(|| build_table(black_box(&locations[0])))
    });
    c.bench_function("build_and_normalize", |b| {
        b.iter(|| {
            let tables = locations
                .iter()
                .map(build_table)
                .collect::<Result<Vec<_>, _>>()
                .unwrap();
            normalize(black_box(tables))
        })
    });
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
