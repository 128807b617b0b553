//! Dump and restore lines through both storage backends.

use ndarray::array;
use plotstore::plot::{Axes, Color, Figure, Handle, LineStyle, Marker};
use plotstore::store::{Backend, Container, NcStore, Store};
use plotstore::{dump, restore, restore_current, PlotStoreError};
use tempfile::TempDir;

fn styled_line(ax: &mut Axes) -> Handle {
    ax.plot(vec![0.0, 0.5, 1.0, 1.5], vec![3.0, -1.0, 0.25, 8.0])
        .color("#1f77b4")
        .linestyle(LineStyle::DashDot)
        .marker(Marker::Triangle)
        .label("measurement")
        .build()
        .unwrap()
}

fn assert_same_line(original: &Handle, restored: &Handle) {
    let original = original.as_line().unwrap();
    let restored = restored.as_line().unwrap();
    assert_eq!(restored.xdata(), original.xdata());
    assert_eq!(restored.ydata(), original.ydata());
    assert_eq!(restored.color(), original.color());
    assert_eq!(restored.linestyle(), original.linestyle());
    assert_eq!(restored.marker(), original.marker());
    assert_eq!(restored.label(), original.label());
}

#[test]
fn line_roundtrip_netcdf() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plot.nc");
    let mut ax = Axes::new();
    let handle = styled_line(&mut ax);

    {
        let mut store = NcStore::create(&path).unwrap();
        dump(&mut store, "fig/curves/first", &handle).unwrap();
    }

    let store = NcStore::open_read(&path).unwrap();
    assert_eq!(store.keys().unwrap(), vec!["/fig/curves/first".to_string()]);
    let record = store.read_record("/fig/curves/first").unwrap();
    assert_eq!(record.data, array![[0.0, 3.0], [0.5, -1.0], [1.0, 0.25], [1.5, 8.0]]);

    let mut other = Axes::new();
    let restored = restore(&store, "fig/curves/first", &mut other).unwrap();
    assert_same_line(&handle, &restored);
}

#[test]
fn line_roundtrip_hdf5_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plot.h5");
    let mut ax = Axes::new();
    let handle = ax.plot([1.0, 2.0], [4.0, 5.0]).build().unwrap();

    {
        let mut container = Container::create(&path).unwrap();
        assert_eq!(container.backend(), Backend::File);
        dump(&mut container, "line", &handle).unwrap();
    }

    let container = Container::open_read(&path).unwrap();
    let mut figure = Figure::new();
    let restored = restore_current(&container, "line", &mut figure).unwrap();
    assert_same_line(&handle, &restored);
    assert!(restored.as_line().unwrap().label().is_none());
}

#[test]
fn line_roundtrip_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plot.json");
    let mut ax = Axes::new();
    let handle = styled_line(&mut ax);

    let mut container = Container::create(&path).unwrap();
    assert_eq!(container.backend(), Backend::Memory);
    dump(&mut container, "fig/first", &handle).unwrap();
    container.save().unwrap();

    let reopened = Container::open(&path).unwrap();
    assert!(reopened.contains("fig/first"));
    let mut other = Axes::new();
    let restored = restore(&reopened, "fig/first", &mut other).unwrap();
    assert_same_line(&handle, &restored);
    assert_eq!(
        restored.as_line().unwrap().color(),
        &Color::rgb(0x1f, 0x77, 0xb4)
    );
}

#[test]
fn appending_to_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plot.nc");
    let mut ax = Axes::new();
    let first = ax.plot([0.0], [0.0]).build().unwrap();
    let second = ax.plot([1.0], [1.0]).build().unwrap();

    {
        let mut store = NcStore::create(&path).unwrap();
        dump(&mut store, "a/one", &first).unwrap();
    }
    {
        let mut store = NcStore::open(&path).unwrap();
        dump(&mut store, "a/two", &second).unwrap();
        assert!(matches!(
            dump(&mut store, "a/one", &second),
            Err(PlotStoreError::InvalidTarget { .. })
        ));
    }

    let store = NcStore::open_read(&path).unwrap();
    let mut keys = store.keys().unwrap();
    keys.sort();
    assert_eq!(keys, vec!["/a/one".to_string(), "/a/two".to_string()]);
}

#[test]
fn writing_to_root_fails_on_both_backends() {
    let dir = TempDir::new().unwrap();
    let mut ax = Axes::new();
    let handle = ax.plot([0.0], [0.0]).build().unwrap();

    let mut file = Container::create(&dir.path().join("plot.nc")).unwrap();
    let mut memory = Container::in_memory();
    for container in [&mut file, &mut memory] {
        assert!(matches!(
            dump(&mut *container, "/", &handle),
            Err(PlotStoreError::InvalidTarget { .. })
        ));
        assert!(container.keys().unwrap().is_empty());
    }
}

#[test]
fn missing_key_is_not_found() {
    let container = Container::in_memory();
    let mut ax = Axes::new();
    assert!(matches!(
        restore(&container, "nothing/here", &mut ax),
        Err(PlotStoreError::NotFound { .. })
    ));
}

#[test]
fn groups_and_records_do_not_overlap() {
    let dir = TempDir::new().unwrap();
    let mut ax = Axes::new();
    let handle = ax.plot([0.0], [0.0]).build().unwrap();

    let mut file = Container::create(&dir.path().join("plot.nc")).unwrap();
    let mut memory = Container::in_memory();
    for container in [&mut file, &mut memory] {
        dump(&mut *container, "fig/curve", &handle).unwrap();
        assert!(matches!(
            dump(&mut *container, "fig", &handle),
            Err(PlotStoreError::InvalidTarget { .. })
        ));
        assert!(matches!(
            dump(&mut *container, "fig/curve/inner", &handle),
            Err(PlotStoreError::InvalidTarget { .. })
        ));
        assert_eq!(container.keys().unwrap(), vec!["/fig/curve".to_string()]);
    }
}

#[test]
fn nan_coordinates_survive_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gaps.json");
    let mut ax = Axes::new();
    let handle = ax.plot([0.0, 1.0, 2.0], [1.0, f64::NAN, 3.0]).build().unwrap();

    let mut container = Container::create(&path).unwrap();
    dump(&mut container, "gap", &handle).unwrap();
    container.save().unwrap();

    let reopened = Container::open_read(&path).unwrap();
    let mut other = Axes::new();
    let restored = restore(&reopened, "gap", &mut other).unwrap();
    let y = restored.as_line().unwrap().ydata();
    assert_eq!(y[0], 1.0);
    assert!(y[1].is_nan());
    assert_eq!(y[2], 3.0);
}
