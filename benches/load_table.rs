use criterion::{Criterion, criterion_group, criterion_main};
use pathrev::io::{Table, read_table, write_table_to_path};
use tempfile::tempdir;

// roughly the size of a whole-transcriptome expression matrix
const GENES: usize = 20_000;
const SAMPLES: usize = 12;

fn expression_matrix() -> Table {
    let columns = (1..=SAMPLES).map(|s| format!("S{}", s)).collect();
    let mut table = Table::new("NAME", columns);
    for g in 0..GENES {
        let values = (0..SAMPLES)
            .map(|s| format!("{:.3}", ((g * 31 + s * 17) % 1000) as f64 / 100.0))
            .collect();
        table.push_row(format!("GENE{}", g), values).unwrap();
    }
    table
}

fn criterion_benchmark(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("matrix.tsv");
    write_table_to_path(&expression_matrix(), &path).unwrap();

    c.bench_function("Read matrix", |b| b.iter(|| read_table(&path).unwrap()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
