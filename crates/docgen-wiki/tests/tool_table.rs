//! Integration tests for the tool status table against a synthetic tools tree.

use docgen_core::DocgenError;
use docgen_wiki::{builtin_tools, generate, ToolEntry};
use std::path::Path;

fn write_jamfile(tools_dir: &Path, dir: &str, body: &str) {
    let path = tools_dir.join(dir);
    std::fs::create_dir_all(&path).unwrap();
    std::fs::write(path.join("Jamfile.v2"), body).unwrap();
}

/// Create a Jamfile for every built-in tool; `sim` shares the xsim file.
fn populate(tools_dir: &Path, tools: &[ToolEntry]) {
    for tool in tools {
        if tool.name == "sim" || tool.name == "xsim" {
            continue;
        }
        let body = match tool.name.as_str() {
            "grape" => "tool grape : grape.cpp : <status>experimental ;\n".to_string(),
            "lps2pbes" => {
                "tool lps2pbes\n  : lps2pbes.cpp\n  : <squadt-connectivity>implemented\n  ;\n".to_string()
            }
            name => format!("import mcrl2 ;\n\ntool {name} : {name}.cpp ;\n"),
        };
        write_jamfile(tools_dir, &tool.name, &body);
    }
    write_jamfile(
        tools_dir,
        "xsim",
        "tool xsim : xsim.cpp ;\ntool sim : sim.cpp : <status>deprecated ;\n",
    );
}

#[test]
fn test_builtin_table_renders_every_row_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let tools_dir = dir.path().join("tools");
    let tools = builtin_tools().unwrap();
    populate(&tools_dir, &tools);

    let output = dir.path().join("output").join("Tool_Status_Overview");
    let report = generate(&tools_dir, &tools, &output).expect("generation failed");
    assert_eq!(report.tools.len(), tools.len());

    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(text.matches("|-\n| [[User manual/").count(), tools.len());

    let mut last = 0;
    for tool in &tools {
        let needle = format!("[[User manual/{0}|{0}]]", tool.name);
        let pos = text.find(&needle).unwrap_or_else(|| panic!("row for {} missing", tool.name));
        assert!(pos >= last, "{} rendered out of order", tool.name);
        last = pos;
    }
}

#[test]
fn test_scraped_values_reach_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let tools_dir = dir.path().join("tools");
    let tools = builtin_tools().unwrap();
    populate(&tools_dir, &tools);

    let output = dir.path().join("table.wiki");
    let report = generate(&tools_dir, &tools, &output).unwrap();

    let by_name = |name: &str| {
        report
            .tools
            .iter()
            .find(|t| t.entry.name == name)
            .unwrap()
            .status
            .clone()
    };
    assert_eq!(by_name("grape").status, "experimental");
    assert_eq!(by_name("lpsinfo").status, "release");
    assert!(by_name("lps2pbes").has_squadt);
    assert!(!by_name("lpsinfo").has_squadt);
    // sim is looked up in tools/xsim
    assert_eq!(by_name("sim").status, "deprecated");
    assert_eq!(by_name("xsim").status, "release");

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains(
        "| [[User manual/diagraphica|diagraphica]] ||align=\"center\" bgcolor=\"lightgreen\"|  ||align=\"center\"| ? ||align=\"center\" | not applicable || release ||align=\"center\"| no\n"
    ));
}

#[test]
fn test_missing_alias_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let tools_dir = dir.path().join("tools");
    let tools = builtin_tools().unwrap();
    populate(&tools_dir, &tools);
    // a tools/sim directory must not be consulted
    write_jamfile(&tools_dir, "sim", "tool sim : sim.cpp : <status>wrong ;\n");
    std::fs::remove_dir_all(tools_dir.join("xsim")).unwrap();

    let err = generate(&tools_dir, &tools, &dir.path().join("t.wiki")).unwrap_err();
    match err {
        DocgenError::MissingBuildFile { tool, path } => {
            assert_eq!(tool, "sim");
            assert!(path.ends_with("xsim/Jamfile.v2"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
