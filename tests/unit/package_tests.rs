/*!
 * Tests for package reading, slide ordering and writing
 */

use anyhow::Result;
use pptranslate::errors::DocumentError;
use pptranslate::pptx::PptxPackage;
use crate::common;

/// Test that slide order follows the sldIdLst, not the part numbering
#[test]
fn test_slideParts_withSldIdLst_shouldFollowPresentationOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("ordered.pptx");

    // slide2.xml comes first in the presentation order
    let parts = vec![
        ("[Content_Types].xml".to_string(), common::CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels".to_string(), common::ROOT_RELS_XML.to_string()),
        (
            "ppt/presentation.xml".to_string(),
            common::presentation_xml(&["rId3", "rId2"]),
        ),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            common::presentation_rels_xml(&[
                ("rId2", "slides/slide1.xml"),
                ("rId3", "slides/slide2.xml"),
            ]),
        ),
        ("ppt/slides/slide1.xml".to_string(), common::slide_xml(&["One"])),
        ("ppt/slides/slide2.xml".to_string(), common::slide_xml(&["Two"])),
    ];
    common::write_pptx_parts(&path, &parts)?;

    let package = PptxPackage::open(&path)?;

    assert_eq!(
        package.slide_parts(),
        ["ppt/slides/slide2.xml", "ppt/slides/slide1.xml"]
    );

    Ok(())
}

/// Test that absolute relationship targets resolve without a ppt/ prefix
#[test]
fn test_slideParts_withAbsoluteTarget_shouldResolveFromPackageRoot() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("absolute.pptx");

    let parts = vec![
        ("ppt/presentation.xml".to_string(), common::presentation_xml(&["rId2"])),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            common::presentation_rels_xml(&[("rId2", "/ppt/slides/slide1.xml")]),
        ),
        ("ppt/slides/slide1.xml".to_string(), common::slide_xml(&["One"])),
    ];
    common::write_pptx_parts(&path, &parts)?;

    let package = PptxPackage::open(&path)?;

    assert_eq!(package.slide_parts(), ["ppt/slides/slide1.xml"]);

    Ok(())
}

/// Test the numeric fallback when the presentation part is missing
#[test]
fn test_slideParts_withoutPresentationPart_shouldScanNumerically() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("scan.pptx");

    // Written out of order, with a two-digit number to defeat
    // lexicographic sorting
    let parts = vec![
        ("ppt/slides/slide10.xml".to_string(), common::slide_xml(&["Ten"])),
        ("ppt/slides/slide2.xml".to_string(), common::slide_xml(&["Two"])),
        ("ppt/slides/slide1.xml".to_string(), common::slide_xml(&["One"])),
    ];
    common::write_pptx_parts(&path, &parts)?;

    let package = PptxPackage::open(&path)?;

    assert_eq!(
        package.slide_parts(),
        [
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/slide10.xml"
        ]
    );

    Ok(())
}

/// Test the fallback when a relationship id cannot be resolved
#[test]
fn test_slideParts_withUnresolvedRelationship_shouldFallBackToScan() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("unresolved.pptx");

    let parts = vec![
        (
            "ppt/presentation.xml".to_string(),
            common::presentation_xml(&["rId2", "rId9"]),
        ),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            common::presentation_rels_xml(&[("rId2", "slides/slide1.xml")]),
        ),
        ("ppt/slides/slide1.xml".to_string(), common::slide_xml(&["One"])),
        ("ppt/slides/slide2.xml".to_string(), common::slide_xml(&["Two"])),
    ];
    common::write_pptx_parts(&path, &parts)?;

    let package = PptxPackage::open(&path)?;

    assert_eq!(
        package.slide_parts(),
        ["ppt/slides/slide1.xml", "ppt/slides/slide2.xml"]
    );

    Ok(())
}

/// Test that a package with neither presentation part nor slides is rejected
#[test]
fn test_open_withNoPresentationAndNoSlides_shouldReturnInvalidFormat() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("empty.pptx");
    common::write_pptx_parts(&path, &[("readme.txt", "not a presentation")])?;

    let result = PptxPackage::open(&path);

    assert!(matches!(result, Err(DocumentError::InvalidFormat(_))));

    Ok(())
}

/// Test that opening garbage bytes reports an archive error
#[test]
fn test_fromBytes_withGarbage_shouldReturnArchiveError() {
    let result = PptxPackage::from_bytes(b"this is not a zip file".to_vec());

    assert!(matches!(result, Err(DocumentError::Archive(_))));
}

/// Test that reading an absent part reports which part is missing
#[test]
fn test_partBytes_withMissingPart_shouldReturnMissingPart() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("deck.pptx");
    common::write_pptx(&path, &[common::slide_xml(&["One"])])?;

    let mut package = PptxPackage::open(&path)?;
    let result = package.part_bytes("ppt/slides/slide99.xml");

    match result {
        Err(DocumentError::MissingPart(name)) => {
            assert_eq!(name, "ppt/slides/slide99.xml");
        },
        other => panic!("Expected MissingPart, got {:?}", other.map(|_| ())),
    }

    Ok(())
}

/// Test that replacements land in the output and untouched entries survive
#[test]
fn test_save_withReplacement_shouldKeepUntouchedEntriesVerbatim() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("deck.pptx");
    common::write_pptx(
        &path,
        &[common::slide_xml(&["One"]), common::slide_xml(&["Two"])],
    )?;

    let mut package = PptxPackage::open(&path)?;
    assert!(!package.is_modified());

    let replacement = common::slide_xml(&["Uno"]);
    package.replace_part("ppt/slides/slide1.xml", replacement.clone().into_bytes());
    assert!(package.is_modified());
    package.save(&path)?;

    let mut reopened = PptxPackage::open(&path)?;
    assert_eq!(
        reopened.part_bytes("ppt/slides/slide1.xml")?,
        replacement.into_bytes()
    );
    // The other slide and the static parts keep their original bytes
    assert_eq!(
        reopened.part_bytes("ppt/slides/slide2.xml")?,
        common::slide_xml(&["Two"]).into_bytes()
    );
    assert_eq!(
        reopened.part_bytes("[Content_Types].xml")?,
        common::CONTENT_TYPES_XML.as_bytes()
    );

    Ok(())
}
