use console::Style;
use plastiscan_core::particle::Particle;
use plastiscan_core::quantify::QuantificationReport;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    shape: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            shape: Style::new().green(),
        }
    }
}

pub fn print_report(report: &QuantificationReport, frames: usize) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Particle Quantification"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(24)));
    println!();

    println!(
        "  {:<22}{}",
        s.label.apply_to("Frames analyzed"),
        s.value.apply_to(frames)
    );
    println!(
        "  {:<22}{}",
        s.label.apply_to("Particles"),
        s.value.apply_to(report.count)
    );
    if report.count == 0 {
        println!();
        return;
    }

    println!(
        "  {:<22}{}",
        s.label.apply_to("Total area (px)"),
        s.value.apply_to(format!("{:.0}", report.total_area))
    );
    println!();

    println!("  {}", s.header.apply_to("Size (px)"));
    println!(
        "  {:<22}{:.1} \u{00b1} {:.1}",
        s.label.apply_to("Mean / std"),
        report.average_size,
        report.std_size
    );
    println!(
        "  {:<22}{:.1}",
        s.label.apply_to("Median"),
        report.median_size
    );
    println!(
        "  {:<22}{:.1} .. {:.1}",
        s.label.apply_to("Min .. max"),
        report.min_size,
        report.max_size
    );
    println!(
        "  {:<22}{:.1}",
        s.label.apply_to("95th percentile"),
        report.percentile_95
    );
    println!();

    println!("  {}", s.header.apply_to("Shape"));
    println!(
        "  {:<22}{:.2}",
        s.label.apply_to("Mean aspect ratio"),
        report.average_aspect_ratio
    );
    println!(
        "  {:<22}{:.2}",
        s.label.apply_to("Mean circularity"),
        report.average_circularity
    );
    for (shape, count) in &report.shape_distribution {
        println!("  {:<22}{}", s.shape.apply_to(shape.as_str()), count);
    }
    println!();

    let sd = &report.size_distribution;
    println!("  {}", s.header.apply_to("Size buckets"));
    println!(
        "  {:<22}tiny {} / small {} / medium {} / large {}",
        s.label.apply_to("Counts"),
        sd.tiny,
        sd.small,
        sd.medium,
        sd.large
    );

    let rd = &report.roughness_distribution;
    println!("  {}", s.header.apply_to("Roughness"));
    println!(
        "  {:<22}smooth {} / rough {} / weathered {}",
        s.label.apply_to("Counts"),
        rd.smooth,
        rd.rough,
        rd.weathered
    );
    println!();
}

pub fn print_particles(particles: &[Particle]) {
    let s = Styles::new();
    println!();
    println!(
        "  {:>4}  {:>9}  {:>8}  {:>7}  {:>6}  {:<9}",
        "#", "area", "centroid", "aspect", "circ", "shape"
    );
    println!("  {}", "-".repeat(54));
    for (i, p) in particles.iter().enumerate() {
        println!(
            "  {:>4}  {:>9.1}  {:>4.0},{:<4.0} {:>7.2}  {:>6.2}  {}",
            i,
            p.area,
            p.centroid.0,
            p.centroid.1,
            p.aspect_ratio(),
            p.circularity,
            s.shape.apply_to(p.shape.as_str())
        );
    }
}
