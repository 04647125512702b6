use super::*;
use crate::application::session::LiveFileSystemProvider;
use crate::guard::{ExportGraphProvider, GraphProvider};

#[test]
fn test_creates_temp_dir_and_writes_file() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TempDirFixture::new()?;

    fixture.write_file("build/lockguard/resolved.toml", "[configurations]\n")?;

    assert!(fixture.file_exists("build/lockguard/resolved.toml"));
    assert_eq!(fixture.read_file("build/lockguard/resolved.toml")?, "[configurations]\n");
    assert!(fixture.path().join("build/lockguard").is_dir());

    Ok(())
}

#[test]
fn test_temp_dir_isolation() -> Result<(), Box<dyn std::error::Error>> {
    let fixture1 = TempDirFixture::new()?;
    let fixture2 = TempDirFixture::new()?;

    assert_ne!(fixture1.path(), fixture2.path());

    fixture1.write_file("test1.txt", "content1")?;
    fixture2.write_file("test2.txt", "content2")?;

    assert!(fixture1.file_exists("test1.txt"));
    assert!(!fixture1.file_exists("test2.txt"));
    assert!(fixture2.file_exists("test2.txt"));

    Ok(())
}

#[test]
fn test_cleanup_on_drop() -> Result<(), Box<dyn std::error::Error>> {
    let path = {
        let fixture = TempDirFixture::new()?;
        fixture.write_file("dependencies/runtime.txt", "a:1\n")?;
        fixture.path().to_path_buf()
    };
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_graph_export_builder_round_trips_through_provider() -> Result<(), Box<dyn std::error::Error>> {
    let content = GraphExportBuilder::new()
        .root("runtime", ":app")
        .node("runtime", ":app", &[":lib", "okhttp:4"])
        .node("runtime", ":lib", &[":app"])
        .configuration("test")
        .render()?;

    let fixture = TempDirFixture::new()?;
    fixture.write_file("resolved.toml", &content)?;

    let provider = ExportGraphProvider::load(&LiveFileSystemProvider, &fixture.path().join("resolved.toml"))?;
    assert_eq!(
        provider.available_configurations().into_iter().collect::<Vec<_>>(),
        vec!["runtime".to_string(), "test".to_string()]
    );

    let runtime = provider.resolve("runtime")?.traverse();
    assert_eq!(runtime.names(), vec![":app", ":lib", "okhttp:4"]);
    assert!(provider.resolve("test")?.traverse().is_empty());

    Ok(())
}
