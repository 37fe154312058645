use libcbench::ArgumentValue;

#[test]
fn every_suite_registers_without_conflicts() -> anyhow::Result<()> {
    let registry = libcbench_suites::registry()?;
    let names: Vec<_> = registry.cases().map(|c| c.name().to_owned()).collect();
    assert_eq!(names.first().map(String::as_str), Some("malloc_single"));
    assert!(names.iter().any(|n| n == "math_sqrt"));
    assert!(names.iter().any(|n| n == "string_strchr"));
    let memcpy = registry.get("string_memcpy").unwrap();
    assert_eq!(memcpy.sweep().unwrap().len(), 8);
    Ok(())
}

#[test]
fn every_run_completes_with_a_few_iterations() -> anyhow::Result<()> {
    let registry = libcbench_suites::registry()?;
    for run in registry.runs() {
        let result = run.run(3)?;
        assert_eq!(result.count(), 3, "{}", run.label());
        assert!(result.mean_ns() >= 0.0);
    }
    Ok(())
}

#[test]
fn string_cases_report_throughput() -> anyhow::Result<()> {
    let registry = libcbench_suites::registry()?;
    for label in ["string_memcpy/512", "string_strcmp/512"] {
        let result = registry.run(label, 100)?;
        assert_eq!(result.bytes_processed(), Some(100 * 512));
        assert_eq!(result.argument(), Some(ArgumentValue::Int(512)));
    }
    let sqrt = registry.run("math_sqrt", 100)?;
    assert_eq!(sqrt.bytes_processed(), None);
    assert_eq!(sqrt.bytes_per_second(), None);
    Ok(())
}

#[test]
fn float_sweeps_label_special_values() -> anyhow::Result<()> {
    let registry = libcbench_suites::registry()?;
    let labels: Vec<_> = registry
        .runs()
        .filter(|r| r.case.name() == "math_isnan_macro")
        .map(|r| r.label())
        .collect();
    assert_eq!(
        labels,
        vec![
            "math_isnan_macro/1234",
            "math_isnan_macro/nan",
            "math_isnan_macro/inf",
            "math_isnan_macro/0"
        ]
    );
    Ok(())
}

#[test]
fn batched_string_cases_scale_with_buffer_size() -> anyhow::Result<()> {
    let registry = libcbench_suites::registry()?;
    let cases = [
        "string_strrchr",
        "string_strcmp",
        "string_strncmp",
        "string_memchr",
        "string_memrchr",
        "string_strchr",
    ];
    for name in cases {
        if registry.get(name).is_none() {
            continue;
        }
        let small = registry.run(&format!("{name}/8"), 2000)?;
        let large = registry.run(&format!("{name}/65536"), 2000)?;
        // Scanning 64 KiB must cost far more than scanning 8 bytes.
        assert!(
            large.mean_ns() >= 10.0 * small.mean_ns(),
            "{name}: {:.2} ns/op at 8 B, {:.2} ns/op at 64 KiB",
            small.mean_ns(),
            large.mean_ns()
        );
        assert!(large.mean_ns() >= 100.0, "{name}: {:.2} ns/op", large.mean_ns());
    }
    Ok(())
}

#[test]
fn suites_register_after_existing_cases() -> anyhow::Result<()> {
    let mut registry = libcbench::BenchmarkRegistry::new();
    registry.add(libcbench::BenchmarkCase::no_arg(
        "local",
        |state: &mut libcbench::State| state.time(|| ()).map(|_| ()),
    )?)?;
    libcbench_suites::register_all(&mut registry)?;
    assert_eq!(registry.len(), libcbench_suites::registry()?.len() + 1);
    assert_eq!(registry.cases().next().map(|c| c.name()), Some("local"));
    Ok(())
}
