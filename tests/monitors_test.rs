use deskmon::core::monitor::sources::{
    CpuTimeSource, CpuTimes, DiskIoCounters, DiskIoSource, GpuDeviceSource, NetIoCounters,
    NetIoSource,
};
use deskmon::core::monitor::{
    CpuMonitor, DiskMonitor, GpuMonitor, MetricKind, MetricSet, Monitor, NetworkMonitor, Reading,
};
use deskmon::ui::{format_rate, render_pass};
use deskmon::{MonitorError, Result};

struct ScriptedNetIo(Vec<(u64, u64)>);

impl NetIoSource for ScriptedNetIo {
    fn counters(&mut self) -> Result<NetIoCounters> {
        if self.0.is_empty() {
            return Err(MonitorError::counter_unavailable("script exhausted"));
        }
        let (bytes_sent, bytes_received) = self.0.remove(0);
        Ok(NetIoCounters {
            bytes_sent,
            bytes_received,
        })
    }
}

struct ScriptedDiskIo(Vec<(u64, u64)>);

impl DiskIoSource for ScriptedDiskIo {
    fn counters(&mut self) -> Result<DiskIoCounters> {
        if self.0.is_empty() {
            return Err(MonitorError::counter_unavailable("no disk counters"));
        }
        let (bytes_read, bytes_written) = self.0.remove(0);
        Ok(DiskIoCounters {
            bytes_read,
            bytes_written,
        })
    }
}

struct ScriptedCpu(Vec<CpuTimes>);

impl CpuTimeSource for ScriptedCpu {
    fn times(&mut self) -> Result<CpuTimes> {
        if self.0.is_empty() {
            return Err(MonitorError::counter_unavailable("script exhausted"));
        }
        Ok(self.0.remove(0))
    }
}

struct FakeGpus(Vec<(u32, u32)>);

impl GpuDeviceSource for FakeGpus {
    fn device_count(&self) -> u32 {
        self.0.len() as u32
    }

    fn utilization(&self, index: u32) -> Result<(u32, u32)> {
        Ok(self.0[index as usize])
    }
}

fn cpu_times(idle: u64, busy: u64) -> CpuTimes {
    CpuTimes {
        user: busy,
        idle,
        ..Default::default()
    }
}

#[test]
fn network_deltas_advance_the_baseline() {
    let mut monitor = NetworkMonitor::with_source(Box::new(ScriptedNetIo(vec![
        (100, 200),
        (150, 260),
        (150, 260),
        (170, 300),
    ])))
    .unwrap();

    assert_eq!(monitor.sample().unwrap(), (50, 60));
    // Baseline moved to (150, 260), so an unchanged counter reads zero...
    assert_eq!(monitor.sample().unwrap(), (0, 0));
    // ...and the next interval is measured from there.
    assert_eq!(monitor.sample().unwrap(), (20, 40));
}

#[test]
fn disk_monitor_shares_the_rate_contract() {
    let mut monitor = DiskMonitor::with_source(Box::new(ScriptedDiskIo(vec![
        (100, 200),
        (150, 260),
    ])))
    .unwrap();
    assert_eq!(monitor.sample().unwrap(), (50, 60));
}

#[test]
fn disk_unavailable_is_typed_not_a_crash() {
    let result = DiskMonitor::with_source(Box::new(ScriptedDiskIo(vec![])));
    assert!(matches!(result, Err(MonitorError::CounterUnavailable(_))));
}

#[test]
fn cpu_utilization_and_divide_by_zero_guard() {
    let mut monitor = CpuMonitor::with_source(Box::new(ScriptedCpu(vec![
        cpu_times(100, 100),
        cpu_times(110, 130),
        cpu_times(110, 130),
    ])))
    .unwrap();

    // total_delta = 40, idle_delta = 10 -> 75.0%
    assert_eq!(monitor.sample().unwrap(), 75.0);
    // Zero elapsed counter time must yield 0.0, not a division by zero.
    assert_eq!(monitor.sample().unwrap(), 0.0);
}

#[test]
fn gpu_sweep_with_fake_devices() {
    let mut monitor = GpuMonitor::with_source(Box::new(FakeGpus(vec![(55, 30), (10, 80)])));
    let readings = monitor.sample();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].device_index, 0);
    assert_eq!(readings[1].core_utilization_pct, 10);
}

#[test]
fn formatting_contract() {
    assert_eq!(format_rate(512), "0.5 KB/s");
    assert_eq!(format_rate(1024), "1.0 KB/s");
    assert_eq!(format_rate(1_048_576), "1.0 MB/s");
    assert_eq!(format_rate(1_572_864), "1.5 MB/s");
}

#[test]
fn activation_is_idempotent_and_deactivation_frees_state() {
    let mut metrics = MetricSet::new();

    // GPU activation never fails: a host without NVIDIA hardware degrades
    // to a zero-device monitor.
    metrics.activate(MetricKind::Gpu).unwrap();
    metrics.activate(MetricKind::Gpu).unwrap();
    assert_eq!(metrics.len(), 1);

    // Deactivating an inactive metric is a no-op, not an error.
    metrics.deactivate(MetricKind::Disk);
    assert_eq!(metrics.len(), 1);

    metrics.deactivate(MetricKind::Gpu);
    assert!(metrics.is_empty());
}

#[test]
fn sampling_pass_renders_as_a_pulled_mapping() {
    let mut metrics = MetricSet::new();
    metrics.install(Monitor::Network(
        NetworkMonitor::with_source(Box::new(ScriptedNetIo(vec![(0, 0), (512, 1_048_576)])))
            .unwrap(),
    ));
    metrics.install(Monitor::Gpu(GpuMonitor::with_source(Box::new(FakeGpus(
        vec![],
    )))));

    let pass = metrics.sample_all();
    let rendered = render_pass(&pass);

    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0].0, MetricKind::Network);
    assert_eq!(rendered[0].1, "up 0.5 KB/s, down 1.0 MB/s");
    assert_eq!(rendered[1].0, MetricKind::Gpu);
    assert_eq!(rendered[1].1, "No Nvidia GPU found");
}

#[test]
fn failed_monitor_does_not_abort_the_pass() {
    let mut metrics = MetricSet::new();
    // Network script runs dry after the baseline read, so its sample fails.
    metrics.install(Monitor::Network(
        NetworkMonitor::with_source(Box::new(ScriptedNetIo(vec![(0, 0)]))).unwrap(),
    ));
    metrics.install(Monitor::Gpu(GpuMonitor::with_source(Box::new(FakeGpus(
        vec![(5, 6)],
    )))));

    let pass = metrics.sample_all();
    assert!(pass[0].1.is_err());
    assert!(matches!(
        pass[1].1,
        Ok(Reading::Gpu { ref devices }) if devices.len() == 1
    ));

    let rendered = render_pass(&pass);
    assert_eq!(rendered[0].1, "n/a");
    assert_eq!(rendered[1].1, "GPU 0: Usage 5%, Memory 6%");
}

#[test]
fn immediate_sample_after_activation_does_not_crash() {
    let mut metrics = MetricSet::new();
    for kind in [MetricKind::Network, MetricKind::Gpu, MetricKind::Memory] {
        metrics.activate(kind).unwrap();
    }
    if std::path::Path::new("/proc/stat").exists() {
        metrics.activate(MetricKind::Cpu).unwrap();
    }

    // Zero elapsed real time: every reading must be well-formed.
    for (kind, result) in metrics.sample_all() {
        let reading = result.unwrap_or_else(|e| panic!("{} failed: {}", kind, e));
        if let Reading::Cpu { usage_percent } = reading {
            assert!((0.0..=100.0).contains(&usage_percent));
        }
    }
}
