// Known AppContainer SIDs and naming rules of the portable derivation.
#![cfg(feature = "portable")]
#![allow(clippy::unwrap_used, reason = "Unwrap is not an issue in tests")]

use app_container_sid::subsystem::PortableSubsystem;
use app_container_sid::{AppContainerSid, Backend, ErrorKind, NameError, Resolver, resolve_with};

const EDGE_SID: &str =
    "S-1-15-2-3624051433-2125758914-1423191267-1740899205-1073925389-3782572162-737981194";
const CONTOSO_SID: &str =
    "S-1-15-2-801041105-1670924674-3195254335-2389282362-4038974191-2358073253-1499211851";

fn resolve(name: &str) -> Result<String, app_container_sid::Error> {
    resolve_with(Backend::Portable, name)
}

#[test]
fn known_package_family_names() {
    assert_eq!(
        resolve("Microsoft.MicrosoftEdge_8wekyb3d8bbwe").unwrap(),
        EDGE_SID
    );
    assert_eq!(resolve("Contoso.DemoApp_8wekyb3d8bbwe").unwrap(), CONTOSO_SID);
    assert_eq!(resolve("contoso.demoapp_8WEKYB3D8BBWE").unwrap(), CONTOSO_SID);
}

#[test]
fn result_is_an_app_container_sid() {
    let sid: AppContainerSid = resolve("Contoso.DemoApp_8wekyb3d8bbwe")
        .unwrap()
        .parse()
        .unwrap();
    assert!(sid.as_sid().is_app_container());
    assert_eq!(sid.to_string(), CONTOSO_SID);
}

#[test]
fn repeated_calls_agree() {
    let resolver = Resolver::new(PortableSubsystem::new());
    let first = resolver.resolve("my-sandbox").unwrap();
    assert!(first.starts_with("S-1-15-2-"), "{first}");
    for _ in 0..3 {
        assert_eq!(resolver.resolve("my-sandbox").unwrap(), first);
    }
}

#[test]
fn forbidden_characters_are_invalid_names() {
    for name in ["bad\\name", "a/b", "x:y", "caf\u{e9}", "tab\there"] {
        let err = resolve(name).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName, "{name:?}");
    }
    assert_eq!(
        resolve("").unwrap_err(),
        app_container_sid::Error::InvalidName(NameError::Empty)
    );
}

#[test]
fn length_boundary() {
    assert!(resolve(&"a".repeat(64)).is_ok());
    let err = resolve(&"a".repeat(65)).unwrap_err();
    assert_eq!(
        err,
        app_container_sid::Error::InvalidName(NameError::TooLong {
            max: 64,
            actual: 65
        })
    );
}
