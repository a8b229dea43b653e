fn main() -> std::process::ExitCode {
    coach_lib::run()
}
