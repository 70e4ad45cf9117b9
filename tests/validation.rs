//! Consistency checks over whole documents.

use proptest::prelude::*;
use sedml::core::is_valid_sid;
use sedml::diagnostics::{ErrorCode, Severity};
use sedml::model::{AbstractTask, Task};
use sedml::read_sedml_from_str;

const BROKEN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" level="1" version="4">
  <listOfModels>
    <model id="m1" language="urn:sedml:language:sbml" source="m1.xml"/>
  </listOfModels>
  <listOfSimulations>
    <uniformTimeCourse id="sim1" initialTime="0" outputStartTime="0" outputEndTime="10" numberOfSteps="10">
      <algorithm kisaoID="KISAO:0000019"/>
    </uniformTimeCourse>
  </listOfSimulations>
  <listOfTasks>
    <task id="t1" modelReference="m2" simulationReference="sim1"/>
    <task id="t2" modelReference="m1" simulationReference="sim9"/>
  </listOfTasks>
  <listOfDataGenerators>
    <dataGenerator id="dg1">
      <listOfVariables>
        <variable id="v" taskReference="t3" symbol="urn:sedml:symbol:time"/>
      </listOfVariables>
      <math xmlns="http://www.w3.org/1998/Math/MathML"><ci>v</ci></math>
    </dataGenerator>
  </listOfDataGenerators>
  <listOfOutputs>
    <report id="r1">
      <listOfDataSets>
        <dataSet id="d1" label="time" dataReference="dg2"/>
      </listOfDataSets>
    </report>
  </listOfOutputs>
</sedML>"#;

#[test]
fn test_every_broken_reference_is_reported() {
    let mut doc = read_sedml_from_str(BROKEN);
    assert!(doc.error_log().is_empty(), "{}", doc.error_log());

    let found = doc.check_consistency();
    let log = doc.error_log();
    assert_eq!(found, 4, "{}", log);
    assert_eq!(log.len(), 4);
    for code in [
        ErrorCode::TASK_MODEL_REF,
        ErrorCode::TASK_SIMULATION_REF,
        ErrorCode::VARIABLE_TASK_REF,
        ErrorCode::DATA_SET_DATA_REF,
    ] {
        assert!(log.contains(code), "missing {} in\n{}", code, log);
    }
    assert!(log.iter().all(|d| d.severity == Severity::Error));
    assert!(log.iter().any(|d| d.message.contains("'m2'")));
}

#[test]
fn test_fixed_document_passes() {
    let mut doc = read_sedml_from_str(BROKEN);
    doc.tasks = vec![
        AbstractTask::Task(Task::new("t1", "m1", "sim1")),
        AbstractTask::Task(Task::new("t2", "m1", "sim1")),
    ];
    doc.data_generators[0].variables[0].task_reference = Some("t1".to_string());
    let Some(sedml::model::Output::Report(report)) = doc.outputs.first_mut() else {
        panic!("Expected a report");
    };
    report.data_sets[0].data_reference = "dg1".to_string();

    assert_eq!(doc.check_consistency(), 0, "{}", doc.error_log());
}

#[test]
fn test_checking_twice_reports_twice() {
    let mut doc = read_sedml_from_str(BROKEN);
    let first = doc.check_consistency();
    let second = doc.check_consistency();
    assert_eq!(first, second);
    assert_eq!(doc.error_log().len(), first + second);
}

#[test]
fn test_duplicate_ids_across_lists() {
    let mut doc = read_sedml_from_str(
        r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version3" level="1" version="3">
  <listOfModels>
    <model id="shared" language="urn:sedml:language:sbml" source="a.xml"/>
  </listOfModels>
  <listOfSimulations>
    <steadyState id="shared">
      <algorithm kisaoID="KISAO:0000282"/>
    </steadyState>
  </listOfSimulations>
</sedML>"#,
    );
    assert!(doc.check_consistency() >= 1);
    assert!(doc.error_log().contains(ErrorCode::DUPLICATE_COMPONENT_ID));
}

proptest! {
    #[test]
    fn well_formed_ids_are_accepted(id in "[A-Za-z_][A-Za-z0-9_]{0,16}") {
        prop_assert!(is_valid_sid(&id));
    }

    #[test]
    fn ids_starting_with_a_digit_are_rejected(id in "[0-9][A-Za-z0-9_]{0,16}") {
        prop_assert!(!is_valid_sid(&id));
    }

    #[test]
    fn malformed_model_ids_are_reported(id in "[0-9][a-z]{0,6}") {
        let mut doc = read_sedml_from_str(&format!(
            r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version4" level="1" version="4">
  <listOfModels>
    <model id="{}" language="urn:sedml:language:sbml" source="m.xml"/>
  </listOfModels>
</sedML>"#,
            id
        ));
        prop_assert_eq!(doc.check_consistency(), 1);
        prop_assert!(doc.error_log().contains(ErrorCode::ID_SYNTAX_RULE));
    }
}
