use std::io::Cursor;

use super::*;
use crate::foundation::core::Category;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "bearsmith_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(w, h, image::Rgb([9, 8, 7]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn put(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

#[test]
fn working_dir_wins_and_skips_later_tiers() {
    let tmp = temp_dir("resolver_short_circuit");
    let work = tmp.join("work");
    let base = tmp.join("base");
    put(&work, "heads/a.jpg", &png_bytes(3, 2));
    // Would fail to decode if the second tier were consulted.
    put(&base, "heads/a.jpg", b"garbage");

    let resolver = MemberResolver::new(&work, &base, Bundle::empty());
    let found = resolver
        .resolve(&MemberRequest::new(Category::Heads, "a"))
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(found.tier, Tier::WorkingDir);
    assert_eq!(found.image.dimensions(), (3, 2));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn falls_through_to_configured_dir_then_bundle() {
    let tmp = temp_dir("resolver_fallthrough");
    let work = tmp.join("work");
    let base = tmp.join("base");
    std::fs::create_dir_all(&work).unwrap();
    put(&base, "bodies/b.jpg", &png_bytes(4, 5));

    let mut bundle = Bundle::empty();
    bundle.insert(&MemberRequest::new(Category::Legs, "c"), png_bytes(4, 1));
    let resolver = MemberResolver::new(&work, &base, bundle);

    let body = resolver
        .resolve(&MemberRequest::new(Category::Bodies, "b"))
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(body.tier, Tier::ConfiguredDir);
    assert_eq!(body.image.dimensions(), (4, 5));

    let leg = resolver
        .resolve(&MemberRequest::new(Category::Legs, "c"))
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(leg.tier, Tier::Bundled);
    assert_eq!(leg.location, "/members/legs/c.jpg");

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn misses_list_every_tier_in_order() {
    let tmp = temp_dir("resolver_misses");
    let resolver = MemberResolver::new(tmp.join("w"), tmp.join("b"), Bundle::empty());
    let member = MemberRequest::new(Category::Heads, "x");

    let Resolution::NotFound(misses) = resolver.resolve(&member).unwrap() else {
        panic!("expected not found");
    };
    assert_eq!(misses.request, member);
    assert_eq!(
        misses.misses.iter().map(|m| m.tier).collect::<Vec<_>>(),
        Tier::ALL.to_vec()
    );

    let text = misses.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "There's no head found:");
    assert!(lines[1].starts_with("In working dir: Image not found: "));
    assert!(lines[1].ends_with("x.jpg"));
    assert!(lines[2].starts_with("In specified dir: Image not found: "));
    assert_eq!(lines[3], "In resources: Image not found: /members/heads/x.jpg");
}

#[test]
fn undecodable_member_is_fatal_not_a_miss() {
    let tmp = temp_dir("resolver_corrupt");
    put(&tmp, "legs/bad.jpg", b"\xFF\xD8 not really");

    let resolver = MemberResolver::new(&tmp, &tmp, Bundle::embedded());
    let err = resolver
        .resolve(&MemberRequest::new(Category::Legs, "bad"))
        .unwrap_err();
    assert!(matches!(err, BearError::Decode { .. }), "{err:?}");

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn unreadable_path_is_fatal_not_a_miss() {
    let tmp = temp_dir("resolver_dir_as_file");
    // A directory where the member file should be.
    std::fs::create_dir_all(tmp.join("heads/dir.jpg")).unwrap();

    let resolver = MemberResolver::new(&tmp, &tmp, Bundle::empty());
    let err = resolver
        .resolve(&MemberRequest::new(Category::Heads, "dir"))
        .unwrap_err();
    assert!(matches!(err, BearError::Io { .. }), "{err:?}");

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn traversal_name_misses_everywhere() {
    let tmp = temp_dir("resolver_traversal");
    put(&tmp, "secret.jpg", &png_bytes(1, 1));
    let resolver = MemberResolver::new(tmp.join("heads"), tmp.join("heads"), Bundle::empty());

    let res = resolver
        .resolve(&MemberRequest::new(Category::Heads, "../../secret"))
        .unwrap();
    assert!(matches!(res, Resolution::NotFound(ref m) if m.misses.len() == 3));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn repeated_resolution_is_identical() {
    let resolver = MemberResolver::new("/nonexistent-w", "/nonexistent-b", Bundle::embedded());
    let member = MemberRequest::new(Category::Bodies, "panda");
    let a = resolver.resolve(&member).unwrap().into_result().unwrap();
    let b = resolver.resolve(&member).unwrap().into_result().unwrap();
    assert_eq!(a.tier, Tier::Bundled);
    assert_eq!(a.image.as_raw(), b.image.as_raw());
}

#[test]
fn file_in_place_of_category_dir_falls_through() {
    let tmp = temp_dir("resolver_not_a_dir");
    // `heads` is a regular file, so `heads/brown.jpg` cannot exist below it.
    put(&tmp, "heads", b"not a directory");

    let resolver = MemberResolver::new(&tmp, &tmp, Bundle::embedded());
    let found = resolver
        .resolve(&MemberRequest::new(Category::Heads, "brown"))
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(found.tier, Tier::Bundled);
    assert_eq!(found.location, "/members/heads/brown.jpg");

    std::fs::remove_dir_all(&tmp).ok();
}

#[cfg(unix)]
#[test]
fn backslash_name_is_looked_up_as_a_file() {
    let tmp = temp_dir("resolver_backslash");
    put(&tmp, "heads/a\\b.jpg", &png_bytes(2, 3));

    let resolver = MemberResolver::new(&tmp, tmp.join("elsewhere"), Bundle::empty());
    let found = resolver
        .resolve(&MemberRequest::new(Category::Heads, "a\\b"))
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(found.tier, Tier::WorkingDir);
    assert_eq!(found.image.dimensions(), (2, 3));

    std::fs::remove_dir_all(&tmp).ok();
}
