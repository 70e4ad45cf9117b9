//! Benchmarks for reading, writing and checking SED-ML documents.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sedml::{SedDocument, read_sedml_from_str, write_sedml_to_string};

const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" level="1" version="4">
  <listOfModels>
    <model id="m1" language="urn:sedml:language:sbml" source="m1.xml"/>
  </listOfModels>
  <listOfSimulations>
    <uniformTimeCourse id="sim1" initialTime="0" outputStartTime="0" outputEndTime="10" numberOfSteps="100">
      <algorithm kisaoID="KISAO:0000019"/>
    </uniformTimeCourse>
  </listOfSimulations>
  <listOfTasks>
    <task id="t1" modelReference="m1" simulationReference="sim1"/>
  </listOfTasks>
</sedML>"#;

const PARAMETER_SCAN: &str = include_str!("../data/examples/parameter_scan_l1v3.sedml");
const FITTING: &str = include_str!("../data/examples/fitting_l1v4.sedml");

fn parse(xml: &str) -> SedDocument {
    read_sedml_from_str(xml)
}

fn bench_read(c: &mut Criterion) {
    c.bench_function("read_minimal", |b| b.iter(|| parse(black_box(MINIMAL))));
    c.bench_function("read_parameter_scan", |b| {
        b.iter(|| parse(black_box(PARAMETER_SCAN)))
    });
    c.bench_function("read_fitting", |b| b.iter(|| parse(black_box(FITTING))));
}

fn bench_write(c: &mut Criterion) {
    let doc = parse(PARAMETER_SCAN);
    c.bench_function("write_parameter_scan", |b| {
        b.iter(|| write_sedml_to_string(black_box(&doc)))
    });
}

fn bench_check_consistency(c: &mut Criterion) {
    let doc = parse(FITTING);
    c.bench_function("check_fitting", |b| {
        b.iter(|| {
            let mut copy = doc.clone();
            copy.check_consistency()
        })
    });
}

fn bench_round_trip(c: &mut Criterion) {
    c.bench_function("round_trip_fitting", |b| {
        b.iter(|| {
            let doc = parse(black_box(FITTING));
            let xml = write_sedml_to_string(&doc).expect("Failed to write");
            parse(&xml)
        })
    });
}

criterion_group!(
    benches,
    bench_read,
    bench_write,
    bench_check_consistency,
    bench_round_trip
);
criterion_main!(benches);
