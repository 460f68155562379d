use chart_pipeline::core::{
    DataTable, LinearScale, Measure, RowKey, StackConfig, StackOffset, stack,
};
use chart_pipeline::render::NullRenderer;
use chart_pipeline::{ChartConfig, ChartInstance, ChartKind, Page};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn yearly_table(rows: i32, series: usize) -> DataTable {
    let fields: Vec<String> = (0..series).map(|i| format!("s{i}")).collect();
    let mut table = DataTable::new("year", fields).expect("valid table");
    for row in 0..rows {
        let values = (0..series)
            .map(|i| {
                if (row as usize + i) % 11 == 0 {
                    Measure::Missing
                } else {
                    Measure::new(f64::from(row) * 1.5 + i as f64 * 10.0)
                }
            })
            .collect();
        table = table
            .with_row(RowKey::year(1000 + row).expect("valid year"), values)
            .expect("valid row");
    }
    table
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 10_000.0), (1080.0, 0.0)).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.map(black_box(4_321.123)).expect("to pixel");
            let _ = scale.invert(px).expect("from pixel");
        })
    });
}

fn bench_stack_expand_1k_rows(c: &mut Criterion) {
    let table = yearly_table(1_000, 8);
    let fields: Vec<String> = (0..8).map(|i| format!("s{i}")).collect();
    let config = StackConfig {
        offset: StackOffset::Expand,
        ..StackConfig::default()
    };

    c.bench_function("stack_expand_1k_rows", |b| {
        b.iter(|| {
            let _ = stack(black_box(&table), black_box(&fields), config).expect("stack");
        })
    });
}

fn bench_stacked_area_load_and_render(c: &mut Criterion) {
    let page = Page::new().with_container("chart", 1600.0);
    let fields: Vec<String> = (0..4).map(|i| format!("s{i}")).collect();
    let config = ChartConfig::for_fields(ChartKind::StackedArea, fields.clone());
    let table = yearly_table(500, 4);

    c.bench_function("stacked_area_load_and_render_500", |b| {
        b.iter(|| {
            let mut chart =
                ChartInstance::mount(&page, "chart", config.clone(), NullRenderer::default())
                    .expect("mount");
            chart.load(black_box(table.clone())).expect("load");
            let _ = chart.render().expect("render");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_stack_expand_1k_rows,
    bench_stacked_area_load_and_render
);
criterion_main!(benches);
