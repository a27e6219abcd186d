fn main() -> std::process::ExitCode {
    neosplus_launcher_lib::run()
}
