fn main() {
    std::process::exit(spoolsuite::app::startup::startup());
}
