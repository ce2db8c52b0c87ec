//! Small NWB fixtures written with the `hdf5` crate for unit tests.

use std::path::Path;

use hdf5::types::{FixedAscii, VarLenUnicode};
use hdf5::Group;

#[derive(Debug, Clone)]
pub enum RateFixture {
    Number(f64),
    Text(&'static str),
    Missing,
}

#[derive(Debug, Clone)]
pub struct AcquisitionFixture {
    pub name: &'static str,
    /// Row-major samples; `columns > 1` writes a (time, channel) dataset.
    pub samples: Vec<f64>,
    pub columns: usize,
    pub rate: RateFixture,
}

impl AcquisitionFixture {
    pub fn new(name: &'static str, samples: Vec<f64>, rate: f64) -> Self {
        Self {
            name,
            samples,
            columns: 1,
            rate: RateFixture::Number(rate),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NwbFixture {
    pub locations: Option<Vec<&'static str>>,
    pub fixed_width_labels: bool,
    pub acquisitions: Vec<AcquisitionFixture>,
}

impl NwbFixture {
    pub fn with_locations(labels: &[&'static str]) -> Self {
        Self {
            locations: Some(labels.to_vec()),
            ..Self::default()
        }
    }
}

pub fn write_nwb(path: &Path, fixture: &NwbFixture) -> hdf5::Result<()> {
    let file = hdf5::File::create(path)?;

    if let Some(labels) = &fixture.locations {
        let electrodes = file
            .create_group("general")?
            .create_group("extracellular_ephys")?
            .create_group("electrodes")?;
        if fixture.fixed_width_labels {
            let labels: Vec<FixedAscii<16>> = labels
                .iter()
                .map(|l| FixedAscii::<16>::from_ascii(l).unwrap())
                .collect();
            electrodes
                .new_dataset_builder()
                .with_data(labels.as_slice())
                .create("location")?;
        } else {
            let labels: Vec<VarLenUnicode> = labels.iter().map(|l| l.parse().unwrap()).collect();
            electrodes
                .new_dataset_builder()
                .with_data(labels.as_slice())
                .create("location")?;
        }
    }

    if !fixture.acquisitions.is_empty() {
        let acquisition = file.create_group("acquisition")?;
        for series in &fixture.acquisitions {
            write_series(&acquisition, series)?;
        }
    }

    Ok(())
}

fn write_series(acquisition: &Group, series: &AcquisitionFixture) -> hdf5::Result<()> {
    let group = acquisition.create_group(series.name)?;

    if series.columns > 1 {
        let rows = series.samples.len() / series.columns;
        let data = group
            .new_dataset::<f64>()
            .shape((rows, series.columns))
            .create("data")?;
        data.write_raw(&series.samples)?;
    } else {
        group
            .new_dataset_builder()
            .with_data(series.samples.as_slice())
            .create("data")?;
    }

    let starting_time = group.new_dataset::<f64>().shape(()).create("starting_time")?;
    starting_time.write_scalar(&0.0)?;
    match &series.rate {
        RateFixture::Number(rate) => {
            starting_time
                .new_attr::<f64>()
                .shape(())
                .create("rate")?
                .write_scalar(rate)?;
        }
        RateFixture::Text(text) => {
            let text: VarLenUnicode = text.parse().unwrap();
            starting_time
                .new_attr::<VarLenUnicode>()
                .shape(())
                .create("rate")?
                .write_scalar(&text)?;
        }
        RateFixture::Missing => {}
    }

    Ok(())
}
