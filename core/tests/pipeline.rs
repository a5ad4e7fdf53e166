//! End-to-end conversion over a synthetic export directory

use dicom_core::value::{DataSetSequence, PrimitiveValue};
use dicom_core::{DataElement, VR};
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
use nifti::{NiftiObject, ReaderOptions};
use octcat_core::extraction::tags::{
    BITS_STORED, CODE_MEANING, COLUMNS, NUMBER_OF_FRAMES, PERFORMED_PROTOCOL_CODE_SEQUENCE,
    PIXEL_SPACING, ROWS, SPACING_BETWEEN_SLICES,
};
use octcat_core::{
    discover_data_directories, AcquisitionType, OctcatError, Pipeline, PipelineOptions,
    RejectionPolicy,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const EXPLICIT_VR_LE: &str = "1.2.840.10008.1.2.1";
const OPT_PHOTOGRAPHY_SOP_CLASS: &str = "1.2.840.10008.5.1.4.1.1.77.1.5.4";

const WIDTH: u16 = 4;
const DEPTH: u16 = 3;
const FRAMES: usize = 128;

fn write_record(
    path: &Path,
    slice_spacing: Option<&str>,
    pixel_width: &str,
    meaning: &str,
    instance: u32,
) {
    let mut dcm = InMemDicomObject::new_empty();
    if let Some(spacing) = slice_spacing {
        dcm.put(DataElement::new(
            SPACING_BETWEEN_SLICES,
            VR::DS,
            PrimitiveValue::from(spacing),
        ));
    }
    dcm.put(DataElement::new(
        NUMBER_OF_FRAMES,
        VR::IS,
        PrimitiveValue::from("128"),
    ));
    dcm.put(DataElement::new(
        PIXEL_SPACING,
        VR::DS,
        PrimitiveValue::Strs(vec![pixel_width.to_string(), "0.002".to_string()].into()),
    ));
    dcm.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(WIDTH)));
    dcm.put(DataElement::new(COLUMNS, VR::US, PrimitiveValue::from(DEPTH)));
    dcm.put(DataElement::new(BITS_STORED, VR::US, PrimitiveValue::from(8_u16)));

    let item = InMemDicomObject::from_element_iter([DataElement::new(
        CODE_MEANING,
        VR::LO,
        PrimitiveValue::from(meaning),
    )]);
    dcm.put(DataElement::new(
        PERFORMED_PROTOCOL_CODE_SEQUENCE,
        VR::SQ,
        DataSetSequence::from(vec![item]),
    ));

    let file = dcm
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(EXPLICIT_VR_LE)
                .media_storage_sop_class_uid(OPT_PHOTOGRAPHY_SOP_CLASS)
                .media_storage_sop_instance_uid(format!("2.25.{}", instance)),
        )
        .unwrap();
    file.write_to_file(path).unwrap();
}

fn write_raw(path: &Path) {
    let len = WIDTH as usize * DEPTH as usize * FRAMES;
    let raw: Vec<u8> = (0..len).map(|i| (i % 256) as u8).collect();
    fs::write(path, raw).unwrap();
}

/// One visit directory with a Macular Cube export and a stray angiography record
fn build_visit(root: &Path, name: &str) -> std::path::PathBuf {
    let visit = root.join(name);
    let data = visit.join("DataFiles").join("E1");
    let img = visit.join("IMGExportFiles");
    fs::create_dir_all(&data).unwrap();
    fs::create_dir_all(&img).unwrap();

    write_record(&data.join("0001.DCM"), Some("0.046"), "0.011", "Macular Cube 512x128", 1);
    write_record(&data.join("0002.DCM"), None, "0.011", "Macular Cube 512x128", 2);
    write_record(&data.join("0003.dcm"), Some("0.048"), "0.011", "Macular Cube 512x128", 3);
    write_record(&data.join("0004.DCM"), Some("0.0117"), "0.0117", "Angiography 3x3 mm", 4);
    fs::write(data.join("0005.DCM"), b"not a dicom file").unwrap();

    write_raw(&img.join("P1_Macular Cube 512x128_OD_cube_raw.img"));
    visit
}

#[test]
fn test_convert_macular_cube() {
    let temp_dir = TempDir::new().unwrap();
    let visit = build_visit(temp_dir.path(), "RIDE_001");

    let conversion = Pipeline::default()
        .convert(&visit, AcquisitionType::MacularCube)
        .unwrap();

    assert_eq!(conversion.dim, (WIDTH as usize, DEPTH as usize, FRAMES));
    assert!((conversion.properties.slice_thickness_mm - 0.047).abs() < 1e-12);
    assert_eq!(conversion.properties.image_width_pixels, WIDTH as u32);

    let obj = ReaderOptions::new()
        .read_file(&conversion.output_path)
        .unwrap();
    let header = obj.header();
    assert_eq!(header.dim[1] as usize, WIDTH as usize);
    assert_eq!(header.dim[2] as usize, DEPTH as usize);
    assert_eq!(header.dim[3] as usize, FRAMES);
    assert_eq!(header.datatype, 2);
    assert_eq!(header.sform_code, 2);
    assert!((header.srow_z[2] - 0.047).abs() < 1e-6);
}

#[test]
fn test_stop_at_first_rejection() {
    let temp_dir = TempDir::new().unwrap();
    let visit = build_visit(temp_dir.path(), "RIDE_001");

    let pipeline = Pipeline::new(
        PipelineOptions::new().with_rejection_policy(RejectionPolicy::StopAtFirst),
    );
    // The record without slice spacing is skipped, not a stopping point
    let conversion = pipeline
        .convert(&visit, AcquisitionType::MacularCube)
        .unwrap();
    assert!((conversion.properties.slice_thickness_mm - 0.047).abs() < 1e-12);

    // A sane record thicker than 1 mm, sorted between 0002 and 0003
    let data = visit.join("DataFiles").join("E1");
    write_record(&data.join("00025.DCM"), Some("1.5"), "0.011", "Macular Cube 512x128", 5);

    let conversion = pipeline
        .convert(&visit, AcquisitionType::MacularCube)
        .unwrap();
    assert_eq!(conversion.properties.slice_thickness_mm, 0.046);

    let skipped = Pipeline::default()
        .convert(&visit, AcquisitionType::MacularCube)
        .unwrap();
    assert!((skipped.properties.slice_thickness_mm - 0.047).abs() < 1e-12);
}

#[test]
fn test_recursive_batch() {
    let temp_dir = TempDir::new().unwrap();
    let first = build_visit(temp_dir.path(), "RIDE_001");
    let second = build_visit(&temp_dir.path().join("site"), "RIDE_002");
    // Second visit holds two raw files for the same scan
    write_raw(
        &second
            .join("IMGExportFiles")
            .join("P1_Macular Cube 512x128_OS_cube_raw.img"),
    );

    let directories = discover_data_directories(temp_dir.path(), true).unwrap();
    assert_eq!(directories, vec![first.clone(), second.clone()]);

    let report = Pipeline::default().run_batch(&directories, &AcquisitionType::ALL);
    assert_eq!(report.outcomes.len(), 6);
    assert_eq!(report.succeeded(), 1);
    assert!(!report.all_failed());

    assert!(first.join("macularCube.nii").is_file());
    assert!(!second.join("macularCube.nii").exists());

    let ambiguous = report
        .outcomes
        .iter()
        .find(|o| o.directory == second && o.acquisition == AcquisitionType::MacularCube)
        .unwrap();
    assert_eq!(
        ambiguous.result.as_ref().unwrap_err().kind,
        "AmbiguousSourceFile"
    );
}

#[test]
fn test_missing_raw_file() {
    let temp_dir = TempDir::new().unwrap();
    let visit = build_visit(temp_dir.path(), "RIDE_001");

    // A 3x3 record exists but no FlowCube raw file
    let result = Pipeline::default().convert(&visit, AcquisitionType::Angiography3x3);
    assert!(matches!(result, Err(OctcatError::NoMatchFound { .. })));
    assert!(!visit.join("angiography3x3.nii").exists());
}
