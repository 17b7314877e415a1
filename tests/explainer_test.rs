// Integration tests for the line explainer

use std::fs;
use std::path::Path;

use cexplain::explainer::explain_source;
use cexplain::Explainer;

#[test]
fn test_scalar_declaration_with_initializer() {
    let records = explain_source("int x = 30;");
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.line, 1);
    assert_eq!(record.code, "int x = 30;");

    let info = record.memory_info.as_ref().expect("memory info expected");
    assert_eq!(info.address.as_deref(), Some("0x7fff0000"));
    assert_eq!(info.value.as_deref(), Some("30"));
    assert_eq!(
        info.binary.as_deref(),
        Some("00000000 00000000 00000000 00011110")
    );
    assert_eq!(info.var_type.as_deref(), Some("int"));
}

#[test]
fn test_array_declaration_with_initializer_list() {
    let records = explain_source("int numbers[5] = {10, 20, 30, 40, 50};");
    assert_eq!(records.len(), 1);

    let info = records[0].memory_info.as_ref().expect("memory info expected");
    // 5 elements x 4 bytes, starting at the base address
    assert_eq!(info.address.as_deref(), Some("0x7fff0000-0x7fff0013"));
    assert_eq!(info.var_type.as_deref(), Some("int[5]"));

    let binary = info.binary.as_deref().expect("element encodings expected");
    let elements: Vec<&str> = binary.split(" | ").collect();
    assert_eq!(elements.len(), 5);
    assert_eq!(elements[0], "00000000 00000000 00000000 00001010");
    assert_eq!(elements[4], "00000000 00000000 00000000 00110010");
}

#[test]
fn test_pointer_takes_address_of_target() {
    let records = explain_source("int x = 30;\nint *ptr = &x;");
    assert_eq!(records.len(), 2);

    let x_info = records[0].memory_info.as_ref().unwrap();
    let ptr_info = records[1].memory_info.as_ref().unwrap();

    // The pointer's rendered value is x's address, zero-extended to 64 bits
    assert_eq!(ptr_info.value, x_info.address);
    assert_eq!(
        ptr_info.binary.as_deref(),
        Some("00000000 00000000 00000000 00000000 01111111 11111111 00000000 00000000")
    );
}

#[test]
fn test_float_uses_ieee754_single_layout() {
    let records = explain_source("float pi = 3.14159;");
    let info = records[0].memory_info.as_ref().unwrap();

    let binary = info.binary.as_deref().unwrap();
    let fields: Vec<&str> = binary.split(" | ").collect();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].len(), 1);
    assert_eq!(fields[1].len(), 8);
    assert_eq!(fields[2].len(), 23);

    let bits = 3.14159f32.to_bits();
    assert_eq!(fields[0], format!("{}", bits >> 31));
    assert_eq!(fields[1], format!("{:08b}", (bits >> 23) & 0xff));
    assert_eq!(fields[2], format!("{:023b}", bits & 0x7f_ffff));
}

#[test]
fn test_comments_and_blank_lines_produce_no_records() {
    let records = explain_source("// comment\n\n   \n// another comment\n");
    assert!(records.is_empty());
}

#[test]
fn test_arithmetic_assignment_reencodes_at_existing_address() {
    let source = "int x = 30;\nint y = 10;\nint z = 0;\nz = x + y;";
    let records = explain_source(source);
    assert_eq!(records.len(), 4);

    let z_decl = records[2].memory_info.as_ref().unwrap();
    let z_assign = records[3].memory_info.as_ref().unwrap();

    assert!(records[3].explanation.contains("x + y"));
    assert!(records[3].explanation.contains("40"));
    assert_eq!(z_assign.address, z_decl.address);
    assert_eq!(z_assign.value.as_deref(), Some("40"));
    assert_eq!(
        z_assign.binary.as_deref(),
        Some("00000000 00000000 00000000 00101000")
    );
}

#[test]
fn test_two_analyses_are_byte_identical() {
    let source = r#"
        #include <stdio.h>

        struct Point {
            int x;
            int y;
        };

        int main() {
            int a = 1;
            double d = 2.5;
            char c = 'A';
            int arr[3] = {1, 2, 3};
            int *p = &a;
            struct Point pt;
            a = a * 3;
            arr[1] = 9;
            printf("a is %d\n", a);
            return 0;
        }
    "#;

    let first = explain_source(source);
    let second = explain_source(source);
    assert_eq!(first, second);
}

#[test]
fn test_allocation_is_monotonic_and_non_overlapping() {
    let source = "char c = 'A';\nint x = 1;\ndouble d = 2.0;\nshort s;\nlong big;\nint arr[4];\nint *p;";
    let mut explainer = Explainer::new();
    explainer.explain(source);

    let layout = explainer.memory_layout();
    assert_eq!(layout.variable_count, 7);
    assert_eq!(layout.total_bytes, 1 + 4 + 8 + 2 + 8 + 16 + 8);

    let mut previous_end = 0u64;
    for block in &layout.blocks {
        let address =
            u64::from_str_radix(block.address.trim_start_matches("0x"), 16).unwrap();
        assert!(
            address >= previous_end,
            "block '{}' overlaps its predecessor",
            block.name
        );
        previous_end = address + block.size_bytes as u64;
    }
}

#[test]
fn test_struct_definition_then_instance() {
    let source = "struct Point {\n    int x;\n    int y;\n};\nstruct Point p;";
    let records = explain_source(source);
    assert_eq!(records.len(), 2);

    // The definition block yields one record, anchored at its opening line
    assert_eq!(records[0].line, 1);
    assert!(records[0].explanation.contains("8 bytes"));
    assert!(records[0].memory_info.is_none());

    let info = records[1].memory_info.as_ref().unwrap();
    assert_eq!(info.address.as_deref(), Some("0x7fff0000-0x7fff0007"));
    assert!(records[1].explanation.contains("x at byte 0"));
    assert!(records[1].explanation.contains("y at byte 4"));
}

#[test]
fn test_undefined_struct_degrades_gracefully() {
    let records = explain_source("struct Ghost g;");
    assert_eq!(records.len(), 1);
    assert!(records[0].memory_info.is_none());
    assert!(records[0].explanation.contains("not been defined"));
}

#[test]
fn test_redeclaration_allocates_fresh_range() {
    let records = explain_source("int x = 1;\nint x = 2;");
    let first = records[0].memory_info.as_ref().unwrap();
    let second = records[1].memory_info.as_ref().unwrap();
    assert_eq!(first.address.as_deref(), Some("0x7fff0000"));
    assert_eq!(second.address.as_deref(), Some("0x7fff0004"));
}

#[test]
fn test_assignment_to_unknown_name_has_no_memory_effect() {
    let records = explain_source("mystery = 42;");
    assert_eq!(records.len(), 1);
    assert!(records[0].memory_info.is_none());
    assert!(records[0].explanation.contains("mystery"));
}

#[test]
fn test_extra_array_initializers_are_ignored() {
    let records = explain_source("int a[2] = {1, 2, 3, 4};");
    let info = records[0].memory_info.as_ref().unwrap();
    assert_eq!(info.address.as_deref(), Some("0x7fff0000-0x7fff0007"));
    assert_eq!(info.binary.as_deref().unwrap().split(" | ").count(), 2);
}

#[test]
fn test_array_length_inferred_from_initializer() {
    let records = explain_source("int a[] = {1, 2, 3};");
    let info = records[0].memory_info.as_ref().unwrap();
    assert_eq!(info.address.as_deref(), Some("0x7fff0000-0x7fff000b"));
    assert_eq!(info.var_type.as_deref(), Some("int[3]"));
}

#[test]
fn test_element_assignment_addresses_by_stride() {
    let records = explain_source("int arr[5];\narr[2] = 42;");
    let info = records[1].memory_info.as_ref().unwrap();
    // base 0x7fff0000 + 2 x 4 bytes
    assert_eq!(info.address.as_deref(), Some("0x7fff0008"));
    assert_eq!(info.value.as_deref(), Some("42"));
    assert_eq!(
        info.binary.as_deref(),
        Some("00000000 00000000 00000000 00101010")
    );
    assert_eq!(info.var_type.as_deref(), Some("int"));
}

#[test]
fn test_char_initializer_stores_ascii_code() {
    let records = explain_source("char c = 'A';");
    let info = records[0].memory_info.as_ref().unwrap();
    assert_eq!(info.value.as_deref(), Some("65"));
    assert_eq!(info.binary.as_deref(), Some("01000001"));
}

#[test]
fn test_negative_initializer_uses_twos_complement() {
    let records = explain_source("int x = -5;");
    let info = records[0].memory_info.as_ref().unwrap();
    assert_eq!(
        info.binary.as_deref(),
        Some("11111111 11111111 11111111 11111011")
    );
}

#[test]
fn test_unsigned_declaration_skips_sign_adjustment() {
    let records = explain_source("unsigned int big = 200;");
    let info = records[0].memory_info.as_ref().unwrap();
    assert_eq!(info.var_type.as_deref(), Some("unsigned int"));
    assert_eq!(
        info.binary.as_deref(),
        Some("00000000 00000000 00000000 11001000")
    );
}

#[test]
fn test_full_program_walkthrough() {
    let source = r#"
        #include <stdio.h>

        int main() {
            int count = 3;
            if (count > 0) {
                printf("positive\n");
            }
            for (i = 0; i < count; i++) {
                process(i);
            }
            while (count > 0) {
                count = count - 1;
            }
            return 0;
        }
    "#;
    let records = explain_source(source);

    let narratives: Vec<&str> =
        records.iter().map(|r| r.explanation.as_str()).collect();

    assert!(narratives[0].contains("stdio.h"));
    assert!(narratives[1].contains("Entry point"));
    assert!(narratives.iter().any(|n| n.contains("'count > 0'")));
    assert!(narratives.iter().any(|n| n.contains("positive")));
    assert!(narratives
        .iter()
        .any(|n| n.contains("'i = 0'") && n.contains("'i < count'") && n.contains("'i++'")));
    assert!(narratives.iter().any(|n| n.contains("Calls the function 'process'")));
    assert!(narratives
        .iter()
        .any(|n| n.contains("Returns 0 from the function")));

    // Line numbers ascend and every non-trivial line produced a record
    for pair in records.windows(2) {
        assert!(pair[0].line < pair[1].line);
    }
}

#[test]
fn test_showcase_program_from_disk() {
    let path = Path::new("demos/showcase.c");
    let source = fs::read_to_string(path).expect("Failed to read demo file");
    let records = explain_source(&source);

    // include, struct definition, main, seven declarations, two
    // assignments, printf, return; braces and blanks drop out
    assert_eq!(records.len(), 14);

    let with_memory = records
        .iter()
        .filter(|r| r.memory_info.is_some())
        .count();
    assert_eq!(with_memory, 9);
}

#[test]
fn test_records_serialize_with_original_field_names() {
    let records = explain_source("int x = 30;");
    let json = serde_json::to_value(&records).unwrap();

    let entry = &json[0];
    assert_eq!(entry["line"], 1);
    assert_eq!(entry["code"], "int x = 30;");
    assert_eq!(entry["memoryInfo"]["value"], "30");
    assert_eq!(entry["memoryInfo"]["type"], "int");

    // Lines without a memory effect omit the field entirely
    let narrative_only = explain_source("return 0;");
    let json = serde_json::to_value(&narrative_only).unwrap();
    assert!(json[0].get("memoryInfo").is_none());
}
