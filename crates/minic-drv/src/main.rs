fn main() {
    std::process::exit(minic_drv::run());
}
