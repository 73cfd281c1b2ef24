use funcgraph_flame::parser::{classify_line, parse_duration, TraceLine};

#[test]
fn test_parse_duration_markers() {
    assert_eq!(parse_duration("0.240"), 0.24);
    assert_eq!(parse_duration("+ 10.012"), 10.012);
    assert_eq!(parse_duration("! 101.500"), 101.5);
    assert_eq!(parse_duration("n/a"), 0.0);
}

#[test]
fn test_classify_report_excerpt() {
    let report = "\
cpus=4
       munmap-412   [002]   118.401233: funcgraph_entry:                   |  do_mas_munmap() {
       munmap-412   [002]   118.401233: funcgraph_entry:                   |    mas_find() {
       munmap-412   [002]   118.401234: funcgraph_entry:        0.180 us   |      mas_walk();
       munmap-412   [002]   118.401235: funcgraph_exit:         0.950 us   |    }
       munmap-412   [002]   118.401250: funcgraph_exit:       + 16.400 us  |  }";

    let classified: Vec<TraceLine> = report.lines().map(classify_line).collect();

    assert_eq!(
        classified,
        vec![
            TraceLine::Unrecognized,
            TraceLine::BlockEntry {
                function: "do_mas_munmap",
                duration_us: None,
            },
            TraceLine::BlockEntry {
                function: "mas_find",
                duration_us: None,
            },
            TraceLine::SingleLineCall {
                function: "mas_walk",
                duration_us: 0.18,
            },
            TraceLine::BlockExit { duration_us: 0.95 },
            TraceLine::BlockExit { duration_us: 16.4 },
        ]
    );
}

#[test]
fn test_single_line_wins_over_entry() {
    // Both shapes start with funcgraph_entry; `();` makes it a single-line call
    let line = "funcgraph_entry:        1.000 us   |  vma_prev();";
    assert!(matches!(
        classify_line(line),
        TraceLine::SingleLineCall { function: "vma_prev", .. }
    ));
}

#[test]
fn test_entry_requires_brace() {
    assert_eq!(
        classify_line("funcgraph_entry:   |  do_mas_munmap()"),
        TraceLine::Unrecognized
    );
}

#[test]
fn test_exit_requires_closing_brace() {
    assert_eq!(
        classify_line("funcgraph_exit:         0.950 us   |"),
        TraceLine::Unrecognized
    );
}

#[test]
fn test_single_line_duration_requires_unit() {
    assert_eq!(
        classify_line("funcgraph_entry:        1.000   |  vma_prev();"),
        TraceLine::Unrecognized
    );
}
