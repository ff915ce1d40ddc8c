use airquality::{AirQualityError, Monitor, TimeWindow};

#[tokio::main]
async fn main() -> Result<(), AirQualityError> {
    env_logger::init();

    let mut monitor = Monitor::new()?;

    match monitor.refresh_stations().await.map(|s| s.len()) {
        Ok(count) => println!("Fetched {count} stations"),
        Err(e) if e.is_remote() => {
            println!("{e}");
            let outcome = monitor.recover().await?;
            println!("{}", outcome.message());
        }
        Err(e) => return Err(e),
    }

    let nearby = monitor
        .stations_near()
        .address("Polanka 3, Poznań")
        .radius_km(10.0)
        .call()
        .await?;
    if nearby.is_empty() {
        println!("Brak stacji w zadanym promieniu.");
        return Ok(());
    }
    for station in &nearby {
        println!("{} ({}, {})", station.name, station.latitude, station.longitude);
    }

    monitor.select_station(nearby[0].id).await?;
    let Some(sensor) = monitor.session().sensors().first().cloned() else {
        return Ok(());
    };
    monitor.select_sensor(sensor.id).await?;

    monitor.session_mut().set_window(TimeWindow::LastWeek);
    let chart = monitor.chart();
    println!("{}: {} points", chart.title(&sensor.param_name), chart.points.len());
    if let Some(range) = chart.range {
        let (lo, hi) = range.padded();
        println!("Y axis {lo:.1} to {hi:.1}");
    }

    println!("{}", monitor.analysis());
    Ok(())
}
