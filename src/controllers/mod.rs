pub mod sizing_controller;
