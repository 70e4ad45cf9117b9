//! Documents survive being written out and read back.
//!
//! Each test reads a document, writes it, reads the output again and
//! compares the two in-memory documents.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use sedml::model::{
    AbstractTask, Algorithm, AlgorithmParameter, Change, ChangeKind, DataGenerator, Model,
    Simulation, Task, Variable,
};
use sedml::xml::{WriteOptions, to_xml_string};
use sedml::{SedDocument, read_sedml, read_sedml_from_str, write_sedml, write_sedml_to_string};

fn round_trip(doc: &SedDocument, description: &str) -> SedDocument {
    let xml = write_sedml_to_string(doc)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", description, e));
    let again = read_sedml_from_str(&xml);
    assert!(
        again.error_log().is_empty(),
        "Re-reading {} logged:\n{}\n{}",
        description,
        again.error_log(),
        xml
    );
    assert_eq!(&again, doc, "Round trip changed {}", description);
    again
}

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data/examples")
        .join(name)
}

#[test]
fn test_round_trip_samples() {
    for name in [
        "oscillator_l1v1.sedml",
        "parameter_scan_l1v3.sedml",
        "fitting_l1v4.sedml",
    ] {
        let doc = read_sedml(sample_path(name));
        round_trip(&doc, name);
    }
}

#[test]
fn test_round_trip_through_file() {
    let doc = read_sedml(sample_path("parameter_scan_l1v3.sedml"));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.sedml");

    write_sedml(&doc, &path).unwrap();
    let copy = read_sedml(&path);
    assert!(copy.error_log().is_empty(), "{}", copy.error_log());
    assert_eq!(copy, doc);

    // a second pass writes the same bytes
    let first = std::fs::read_to_string(&path).unwrap();
    write_sedml(&copy, &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn test_round_trip_built_document() {
    let mut doc = SedDocument::with_level_and_version(1, 2);
    doc.add_namespace("sbml", "http://www.sbml.org/sbml/level2/version4");
    doc.base.name = Some("built in code".to_string());

    let mut model = Model::new("m1", "urn:sedml:language:sbml", "model.xml");
    model.changes.push(Change::change_attribute(
        "/sbml:sbml/sbml:model/@name",
        "renamed",
    ));
    model.changes.push(Change::new(
        "/sbml:sbml/sbml:model/sbml:listOfSpecies",
        ChangeKind::AddXml {
            new_xml: r#"<species id="S9" compartment="c"/>"#.to_string(),
        },
    ));
    doc.models.push(model);
    doc.simulations.push(
        Simulation::uniform_time_course("sim1", 0.0, 0.0, 5.0, 50).with_algorithm(
            Algorithm::new("KISAO:0000019")
                .with_parameter(AlgorithmParameter::new("KISAO:0000209", "1e-6")),
        ),
    );
    doc.tasks
        .push(AbstractTask::Task(Task::new("t1", "m1", "sim1")));
    doc.data_generators.push(DataGenerator::for_variable(
        "dg_S1",
        Variable::with_target("S1", "/sbml:sbml/sbml:model/sbml:listOfSpecies/sbml:species[@id='S1']")
            .task_reference("t1"),
    ));

    round_trip(&doc, "a document built in code");
}

#[test]
fn test_compact_output_reads_back() {
    let doc = read_sedml(sample_path("fitting_l1v4.sedml"));
    let options = WriteOptions {
        indent: None,
        xml_declaration: false,
    };
    let xml = to_xml_string(&doc, &options).unwrap();
    assert!(xml.starts_with("<sedML "));
    assert!(!xml.contains('\n'));
    assert_eq!(read_sedml_from_str(&xml), doc);
}
