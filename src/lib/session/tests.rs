//! Tests for the editing session.

use std::cell::{Cell, RefCell};
use std::fs;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use spectral::prelude::*;

use crate::caption::Compositor;
use crate::error::Error;
use crate::model::{CaptionText, RenderParameters, DEFAULT_SHARE_TEXT};
use crate::resources::{BaseImage, CaptionCatalog};
use crate::share::{PostError, PostId, PostingCapability, ShareRequest};
use crate::testing::{test_font, TempDir};
use super::{Notice, Session, Severity, POSTING_DISABLED_WARNING};


type Notices = Rc<RefCell<Vec<Notice>>>;

fn session(dir: &TempDir, compositor: Compositor) -> (Session, Notices) {
    let notices: Notices = Rc::new(RefCell::new(vec![]));
    let session = Session::builder()
        .template_directory(dir.path().join("images"))
        .caption_catalog(CaptionCatalog::fallback())
        .compositor(compositor)
        .posting(PostingCapability::Enabled)
        .observer({
            let notices = notices.clone();
            move |n: &Notice| notices.borrow_mut().push(n.clone())
        })
        .build();
    (session, notices)
}

fn severities(notices: &Notices) -> Vec<Severity> {
    notices.borrow().iter().map(|n| n.severity).collect()
}


#[test]
fn builder_warns_about_missing_resources() {
    let dir = TempDir::new("session_builder_warns_about_missing_resources");
    let notices: Notices = Rc::new(RefCell::new(vec![]));
    let session = Session::builder()
        .captions_file(dir.path().join("captions.csv"))
        .font_file(dir.path().join("impact.ttf"))
        .observer({
            let notices = notices.clone();
            move |n: &Notice| notices.borrow_mut().push(n.clone())
        })
        .build();

    assert_eq!(CaptionCatalog::fallback(), *session.catalog());
    assert_eq!(vec![Severity::Warning, Severity::Warning], severities(&notices));
    assert_that!(session.posting().is_enabled()).is_false();
}

#[test]
fn builder_warns_when_posting_disabled() {
    let notices: Notices = Rc::new(RefCell::new(vec![]));
    let session = Session::builder()
        .caption_catalog(CaptionCatalog::fallback())
        .compositor(Compositor::without_font())
        .posting(PostingCapability::MissingCredentials)
        .observer({
            let notices = notices.clone();
            move |n: &Notice| notices.borrow_mut().push(n.clone())
        })
        .build();

    assert_that!(session.posting().is_enabled()).is_false();
    assert_eq!(vec![Severity::Warning], severities(&notices));
    assert_eq!(POSTING_DISABLED_WARNING, notices.borrow()[0].message);
}

#[test]
fn builder_quiet_when_posting_enabled() {
    let dir = TempDir::new("session_builder_quiet_when_posting_enabled");
    let (session, notices) = session(&dir, Compositor::without_font());
    assert_that!(session.posting().is_enabled()).is_true();
    assert_that!(notices.borrow().is_empty()).is_true();
}

#[test]
fn missing_font_still_draws_text() {
    let dir = TempDir::new("session_missing_font_still_draws_text");
    let path = dir.png("cat.png", 400, 300);
    let mut session = Session::builder()
        .caption_catalog(CaptionCatalog::fallback())
        .font_file(dir.path().join("impact.ttf"))
        .build();
    session.load_image(&path).unwrap();
    session.set_top_text("STILL HERE");

    let base = session.base_image().unwrap().clone();
    assert_that!(session.image().unwrap().as_rgba() != base.as_rgba()).is_true();
}

#[test]
fn load_image_renders() {
    let dir = TempDir::new("session_load_image_renders");
    let path = dir.png("cat.png", 40, 30);
    let (mut session, notices) = session(&dir, Compositor::without_font());

    session.load_image(&path).unwrap();
    let base = session.base_image().unwrap().clone();
    assert_eq!((40, 30), base.dimensions());
    assert_that!(session.image().unwrap().as_rgba()).is_equal_to(base.as_rgba());
    assert_that!(notices.borrow().is_empty()).is_true();
}

#[test]
fn load_failure_keeps_previous_image() {
    let dir = TempDir::new("session_load_failure_keeps_previous_image");
    let good = dir.png("good.png", 40, 30);
    dir.write("bad.png", b"garbage");
    let (mut session, notices) = session(&dir, Compositor::without_font());

    session.load_image(&good).unwrap();
    let result = session.load_image(dir.path().join("bad.png"));
    match result {
        Err(Error::LoadFailure(..)) => {}
        other => panic!("expected LoadFailure, got {:?}", other),
    }
    assert_eq!((40, 30), session.base_image().unwrap().dimensions());
    assert_that!(session.image()).is_some();
    assert_eq!(vec![Severity::Error], severities(&notices));
}

#[test]
fn random_template_sets_caption() {
    let dir = TempDir::new("session_random_template_sets_caption");
    fs::create_dir(dir.path().join("images")).unwrap();
    dir.png("images/a.png", 20, 20);
    dir.png("images/b.png", 30, 20);
    let (mut session, _) = session(&dir, Compositor::without_font());
    session.set_bottom_text("leftover");

    let picked = session.random_template(&mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(picked.caption, session.text().top);
    assert_that!(session.text().bottom.is_empty()).is_true();
    assert_that!(session.catalog().as_slice().contains(&picked.caption)).is_true();
    assert_that!(session.base_image()).is_some();
    assert_that!(session.image()).is_some();
}

#[test]
fn random_template_without_images() {
    let dir = TempDir::new("session_random_template_without_images");
    let good = dir.png("good.png", 40, 30);
    let (mut session, notices) = session(&dir, Compositor::without_font());
    session.load_image(&good).unwrap();
    session.set_top_text("KEEP ME");

    let result = session.random_template(&mut StdRng::seed_from_u64(5));
    match result {
        Err(Error::EmptyCatalog(_)) => {}
        other => panic!("expected EmptyCatalog, got {:?}", other),
    }
    assert_eq!("KEEP ME", session.text().top);
    assert_eq!((40, 30), session.base_image().unwrap().dimensions());
    assert_eq!(vec![Severity::Warning], severities(&notices));
}

#[test]
fn sliders_without_image() {
    let dir = TempDir::new("session_sliders_without_image");
    let (mut session, _) = session(&dir, Compositor::without_font());

    session.set_font_size(30);
    session.set_top_padding(1);
    session.set_left_margin(2);
    session.set_bottom_padding(3);
    session.set_top_text("text");
    assert_that!(session.image()).is_none();
    assert_that!(*session.parameters()).is_equal_to(RenderParameters{
        font_size: 30, top_padding: 1, left_margin: 2, bottom_padding: 3,
    });
}

#[test]
fn save_without_image() {
    let dir = TempDir::new("session_save_without_image");
    let (session, notices) = session(&dir, Compositor::without_font());

    let result = session.save(dir.path().join("output"), &mut StdRng::seed_from_u64(1));
    match result {
        Err(Error::NoContent) => {}
        other => panic!("expected NoContent, got {:?}", other),
    }
    assert_that!(dir.path().join("output").exists()).is_false();
    assert_eq!(vec![Severity::Warning], severities(&notices));
}

#[test]
fn save_numbered_file() {
    let dir = TempDir::new("session_save_numbered_file");
    let path = dir.png("cat.png", 40, 30);
    let (mut session, notices) = session(&dir, Compositor::without_font());
    session.load_image(&path).unwrap();

    let output = dir.path().join("output");
    let saved = session.save(&output, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(Some(output.as_path()), saved.parent());

    let name = saved.file_name().unwrap().to_string_lossy().into_owned();
    assert_that!(name.starts_with("meme_") && name.ends_with(".png")).is_true();
    let number: u32 = name["meme_".len()..name.len() - ".png".len()].parse().unwrap();
    assert_that!(1 <= number && number <= 1000).is_true();

    let reloaded = BaseImage::open(&saved).unwrap();
    assert_that!(reloaded.as_rgba()).is_equal_to(session.image().unwrap().as_rgba());
    assert_eq!(vec![Severity::Info], severities(&notices));
}

#[test]
fn clear_resets_everything() {
    let dir = TempDir::new("session_clear_resets_everything");
    let path = dir.png("cat.png", 40, 30);
    let (mut session, _) = session(&dir, Compositor::without_font());
    session.load_image(&path).unwrap();
    session.set_top_text("top");
    session.set_bottom_text("bottom");
    session.set_font_size(10);

    session.clear();
    assert_that!(session.base_image()).is_none();
    assert_that!(session.image()).is_none();
    assert_eq!(CaptionText::default(), *session.text());
    assert_eq!(RenderParameters::default(), *session.parameters());
}

#[test]
fn rerender_starts_from_pristine_base() {
    let font = test_font();
    let dir = TempDir::new("session_rerender_starts_from_pristine_base");
    let path = dir.png("cat.png", 400, 300);
    let (mut session, _) = session(&dir, Compositor::with_font(font));
    session.load_image(&path).unwrap();
    let pristine = session.base_image().unwrap().clone();

    session.set_top_text("FIRST TEXT");
    session.set_font_size(60);
    session.set_top_text("SECOND");
    assert_that!(*session.base_image().unwrap()).is_equal_to(pristine.clone());

    let expected = {
        let font = test_font();
        let params = RenderParameters{font_size: 60, ..RenderParameters::default()};
        Compositor::with_font(font).render(&pristine, &CaptionText::top("SECOND"), &params)
    };
    assert_that!(session.image().unwrap().as_rgba()).is_equal_to(expected.as_rgba());
}

#[test]
fn slider_rerenders() {
    let font = test_font();
    let dir = TempDir::new("session_slider_rerenders");
    let path = dir.png("cat.png", 400, 300);
    let (mut session, _) = session(&dir, Compositor::with_font(font));
    session.load_image(&path).unwrap();
    session.set_bottom_text("EPIC FAIL!");
    let before = session.image().unwrap().clone();

    session.set_bottom_padding(100);
    assert_that!(session.image().unwrap() != &before).is_true();
}


#[test]
fn share_without_image() {
    let dir = TempDir::new("session_share_without_image");
    let (session, _) = session(&dir, Compositor::without_font());
    let calls = Cell::new(0);
    let poster = |_: &ShareRequest| -> Result<PostId, PostError> {
        calls.set(calls.get() + 1);
        Ok(PostId("1".into()))
    };

    match session.share(Some(&poster), |_| true) {
        Err(Error::NoContent) => {}
        other => panic!("expected NoContent, got {:?}", other),
    }
    assert_eq!(0, calls.get());
}

#[test]
fn share_when_disabled() {
    let dir = TempDir::new("session_share_when_disabled");
    let path = dir.png("cat.png", 40, 30);
    let mut session = Session::builder()
        .caption_catalog(CaptionCatalog::fallback())
        .compositor(Compositor::without_font())
        .posting(PostingCapability::MissingCredentials)
        .build();
    session.load_image(&path).unwrap();

    let calls = Cell::new(0);
    let poster = |_: &ShareRequest| -> Result<PostId, PostError> {
        calls.set(calls.get() + 1);
        Ok(PostId("1".into()))
    };
    match session.share(Some(&poster), |_| true) {
        Err(Error::PostingDisabled) => {}
        other => panic!("expected PostingDisabled, got {:?}", other),
    }
    assert_eq!(0, calls.get());
}

#[test]
fn share_without_client() {
    let dir = TempDir::new("session_share_without_client");
    let path = dir.png("cat.png", 40, 30);
    let (mut session, notices) = session(&dir, Compositor::without_font());
    session.load_image(&path).unwrap();

    match session.share(None, |_| panic!("nothing to confirm without a client")) {
        Err(Error::PostingDisabled) => {}
        other => panic!("expected PostingDisabled, got {:?}", other),
    }
    assert_eq!(vec![Severity::Warning], severities(&notices));
}

#[test]
fn share_not_confirmed() {
    let dir = TempDir::new("session_share_not_confirmed");
    let path = dir.png("cat.png", 40, 30);
    let (mut session, _) = session(&dir, Compositor::without_font());
    session.load_image(&path).unwrap();

    let calls = Cell::new(0);
    let poster = |_: &ShareRequest| -> Result<PostId, PostError> {
        calls.set(calls.get() + 1);
        Ok(PostId("1".into()))
    };
    assert_that!(session.share(Some(&poster), |_| false)).is_ok().is_none();
    assert_eq!(0, calls.get());
}

#[test]
fn share_uses_default_text() {
    let dir = TempDir::new("session_share_uses_default_text");
    let path = dir.png("cat.png", 40, 30);
    let (mut session, notices) = session(&dir, Compositor::without_font());
    session.load_image(&path).unwrap();
    session.set_top_text("   ");

    let posted = RefCell::new(None);
    let poster = |r: &ShareRequest| -> Result<PostId, PostError> {
        *posted.borrow_mut() = Some(r.text().to_owned());
        Ok(PostId("42".into()))
    };
    let id = session.share(Some(&poster), |_| true).unwrap();
    assert_eq!(Some(PostId("42".into())), id);
    assert_eq!(Some(DEFAULT_SHARE_TEXT.to_owned()), posted.into_inner());
    assert_eq!(vec![Severity::Info], severities(&notices));
}

#[test]
fn share_failure() {
    let dir = TempDir::new("session_share_failure");
    let path = dir.png("cat.png", 40, 30);
    let (mut session, notices) = session(&dir, Compositor::without_font());
    session.load_image(&path).unwrap();
    session.set_top_text("MEME LORD!");

    let poster = |_: &ShareRequest| -> Result<PostId, PostError> {
        Err(PostError::new("rate limited"))
    };
    match session.share(Some(&poster), |_| true) {
        Err(Error::Post(e)) => assert_eq!("rate limited", e.message()),
        other => panic!("expected PostError, got {:?}", other),
    }
    assert_eq!(vec![Severity::Error], severities(&notices));
    assert_that!(session.image()).is_some();
}
